//! Per-segment reframe-and-encode implementation
//!
//! For one planned segment this opens the source, decodes the [start, end)
//! window, pushes every frame through a crop/scale/fps filter chain, and
//! writes an H.264 stream with no audio. All decoder, filter, and encoder
//! state is local to the call so each segment's buffers are released before
//! the next segment starts.

use ffmpeg_next as ffmpeg;
use ffmpeg::util::rational::Rational;
use ffmpeg::{codec, filter, format, media};
use tracing::{debug, info};

use crate::engine::{EncodeSpec, RenderConfig};
use crate::error::{SplitXError, SplitXResult};
use crate::geometry::CropRect;

/// Tolerance for comparing frame timestamps against segment boundaries
const PTS_EPSILON: f64 = 1e-6;

/// Reframe encoder shared by all segments of one run
///
/// Holds the crop rectangle (computed once from the original source
/// dimensions) and the fixed encode contract. `render` is invoked once per
/// segment, strictly sequentially.
pub struct ReframeEncoder {
    crop: CropRect,
    spec: EncodeSpec,
}

impl ReframeEncoder {
    /// Create an encoder for the given crop geometry and encode contract
    pub fn new(crop: CropRect, spec: EncodeSpec) -> Self {
        Self { crop, spec }
    }

    /// Filter chain applied to every decoded frame: center-crop to the
    /// target aspect ratio, resize to the exact target resolution (the crop
    /// already matched the aspect, so this only normalizes pixel counts),
    /// then force the output frame rate and pixel format.
    fn filter_spec(&self) -> String {
        format!(
            "crop={}:{}:{}:{},scale={}:{},fps={},format=yuv420p",
            self.crop.width,
            self.crop.height,
            self.crop.x,
            self.crop.y,
            self.spec.width,
            self.spec.height,
            self.spec.fps,
        )
    }

    /// Render one segment to `config.output_path`.
    pub fn render(&self, config: &RenderConfig) -> SplitXResult<()> {
        info!(
            "Rendering {} ({:.3}s - {:.3}s)",
            config.output_path, config.start_time, config.end_time
        );

        // Fresh input context per segment; decoded state must not outlive
        // this call.
        let mut ictx = format::input(&config.input_path).map_err(|e| SplitXError::Decode {
            message: format!("Failed to open input file: {e}"),
        })?;

        let input_stream = ictx
            .streams()
            .best(media::Type::Video)
            .ok_or_else(|| SplitXError::Decode {
                message: "No video stream found in input file".to_string(),
            })?;
        let video_stream_index = input_stream.index();
        let in_time_base = input_stream.time_base();

        let mut decoder = codec::context::Context::from_parameters(input_stream.parameters())
            .map_err(|e| SplitXError::Decode {
                message: format!("Failed to create decoder context: {e}"),
            })?
            .decoder()
            .video()
            .map_err(|e| SplitXError::Decode {
                message: format!("Failed to create video decoder: {e}"),
            })?;

        // Output context and encoder
        let mut octx = format::output(&config.output_path).map_err(|e| SplitXError::Encode {
            message: format!("Failed to create output file: {e}"),
        })?;

        let codec_h264 =
            ffmpeg::encoder::find(codec::Id::H264).ok_or_else(|| SplitXError::Encode {
                message: "H.264 encoder not available".to_string(),
            })?;

        let frame_time_base = Rational::new(1, self.spec.fps as i32);
        let global_header = octx
            .format()
            .flags()
            .contains(format::Flags::GLOBAL_HEADER);

        let mut video_encoder = {
            let mut ost = octx.add_stream(codec_h264).map_err(|e| SplitXError::Encode {
                message: format!("Failed to add video stream: {e}"),
            })?;
            ost.set_time_base(frame_time_base);

            let mut enc = codec::context::Context::new_with_codec(codec_h264)
                .encoder()
                .video()
                .map_err(|e| SplitXError::Encode {
                    message: format!("Failed to create video encoder: {e}"),
                })?;

            enc.set_width(self.spec.width);
            enc.set_height(self.spec.height);
            enc.set_format(format::Pixel::YUV420P);
            enc.set_time_base(frame_time_base);
            enc.set_frame_rate(Some(Rational::new(self.spec.fps as i32, 1)));
            enc.set_bit_rate(self.spec.bitrate());
            enc.set_aspect_ratio(Rational::new(1, 1));
            if global_header {
                enc.set_flags(codec::Flags::GLOBAL_HEADER);
            }

            let mut opts = ffmpeg::Dictionary::new();
            opts.set("preset", &self.spec.preset);

            let opened = enc.open_with(opts).map_err(|e| SplitXError::Encode {
                message: format!("Failed to open H.264 encoder: {e}"),
            })?;

            ost.set_parameters(&opened);
            opened
        };

        octx.write_header().map_err(|e| SplitXError::Encode {
            message: format!("Failed to write output header: {e}"),
        })?;
        let out_time_base = octx
            .stream(0)
            .map(|s| s.time_base())
            .unwrap_or(frame_time_base);

        let mut graph = self.build_filter_graph(&decoder, in_time_base)?;

        // Seek to the keyframe at or before the segment start; the decode
        // loop drops the pre-roll frames up to the exact start time.
        if config.start_time > 0.0 {
            let seek_target = (config.start_time * f64::from(ffmpeg::ffi::AV_TIME_BASE)) as i64;
            ictx.seek(seek_target, ..seek_target)
                .map_err(|e| SplitXError::Decode {
                    message: format!("Failed to seek to {:.3}s: {e}", config.start_time),
                })?;
        }

        // Start time expressed in the input stream's timebase, for rebasing
        // frame timestamps so the segment's first frame lands at zero.
        let start_pts = (config.start_time * in_time_base.denominator() as f64
            / in_time_base.numerator() as f64) as i64;

        let mut frames_sent: u64 = 0;
        let mut frames_encoded: u64 = 0;

        'packets: for (stream, packet) in ictx.packets() {
            if stream.index() != video_stream_index {
                continue;
            }
            decoder
                .send_packet(&packet)
                .map_err(|e| SplitXError::Decode {
                    message: format!("Failed to send packet to decoder: {e}"),
                })?;

            let mut decoded = ffmpeg::frame::Video::empty();
            while decoder.receive_frame(&mut decoded).is_ok() {
                let pts = match decoded.pts() {
                    Some(pts) => pts,
                    None => continue,
                };
                let seconds = pts as f64 * f64::from(in_time_base);

                // Half-open window: the frame at end belongs to the next
                // segment, never to this one.
                if seconds < config.start_time - PTS_EPSILON {
                    continue;
                }
                if seconds >= config.end_time - PTS_EPSILON {
                    break 'packets;
                }

                decoded.set_pts(Some(pts - start_pts));
                self.filter_and_encode(
                    &mut graph,
                    &mut video_encoder,
                    &mut octx,
                    Some(&decoded),
                    frame_time_base,
                    out_time_base,
                    &mut frames_encoded,
                )?;
                frames_sent += 1;
            }
        }

        // Codecs with frame reordering hold frames internally; flush them
        // through the same window check.
        decoder.send_eof().map_err(|e| SplitXError::Decode {
            message: format!("Failed to flush video decoder: {e}"),
        })?;
        let mut decoded = ffmpeg::frame::Video::empty();
        while decoder.receive_frame(&mut decoded).is_ok() {
            let pts = match decoded.pts() {
                Some(pts) => pts,
                None => continue,
            };
            let seconds = pts as f64 * f64::from(in_time_base);
            if seconds < config.start_time - PTS_EPSILON {
                continue;
            }
            if seconds >= config.end_time - PTS_EPSILON {
                break;
            }
            decoded.set_pts(Some(pts - start_pts));
            self.filter_and_encode(
                &mut graph,
                &mut video_encoder,
                &mut octx,
                Some(&decoded),
                frame_time_base,
                out_time_base,
                &mut frames_encoded,
            )?;
            frames_sent += 1;
        }

        if frames_sent == 0 {
            return Err(SplitXError::Decode {
                message: format!(
                    "No decodable frames in range {:.3}s - {:.3}s",
                    config.start_time, config.end_time
                ),
            });
        }

        // Flush the filter graph, then the encoder.
        self.filter_and_encode(
            &mut graph,
            &mut video_encoder,
            &mut octx,
            None,
            frame_time_base,
            out_time_base,
            &mut frames_encoded,
        )?;

        video_encoder.send_eof().map_err(|e| SplitXError::Encode {
            message: format!("Failed to flush video encoder: {e}"),
        })?;
        Self::drain_encoder(
            &mut video_encoder,
            &mut octx,
            frame_time_base,
            out_time_base,
        )?;

        octx.write_trailer().map_err(|e| SplitXError::Encode {
            message: format!("Failed to write output trailer: {e}"),
        })?;

        debug!(
            "Segment done: {} decoded frames in, {} encoded frames out",
            frames_sent, frames_encoded
        );

        Ok(())
    }

    /// Build the crop/scale/fps graph for this run's geometry.
    ///
    /// The buffer source is described with the decoder's own format and the
    /// input stream's timebase; the fps filter then resamples to the target
    /// rate by duplicating or dropping frames as needed.
    fn build_filter_graph(
        &self,
        decoder: &codec::decoder::Video,
        in_time_base: Rational,
    ) -> SplitXResult<filter::Graph> {
        let pix_fmt = decoder
            .format()
            .descriptor()
            .map(|d| d.name().to_string())
            .ok_or_else(|| SplitXError::Decode {
                message: "Decoder reports an unknown pixel format".to_string(),
            })?;

        let sar = decoder.aspect_ratio();
        let (sar_num, sar_den) = if sar.numerator() > 0 && sar.denominator() > 0 {
            (sar.numerator(), sar.denominator())
        } else {
            (1, 1)
        };

        let args = format!(
            "video_size={}x{}:pix_fmt={}:time_base={}/{}:pixel_aspect={}/{}",
            decoder.width(),
            decoder.height(),
            pix_fmt,
            in_time_base.numerator(),
            in_time_base.denominator(),
            sar_num,
            sar_den,
        );

        let mut graph = filter::Graph::new();
        graph
            .add(
                &filter::find("buffer").ok_or_else(|| SplitXError::Encode {
                    message: "buffer filter not available".to_string(),
                })?,
                "in",
                &args,
            )
            .map_err(|e| SplitXError::Encode {
                message: format!("Failed to create buffer source: {e}"),
            })?;
        graph
            .add(
                &filter::find("buffersink").ok_or_else(|| SplitXError::Encode {
                    message: "buffersink filter not available".to_string(),
                })?,
                "out",
                "",
            )
            .map_err(|e| SplitXError::Encode {
                message: format!("Failed to create buffer sink: {e}"),
            })?;

        let spec = self.filter_spec();
        graph
            .output("in", 0)
            .and_then(|o| o.input("out", 0))
            .and_then(|i| i.parse(&spec))
            .map_err(|e| SplitXError::Encode {
                message: format!("Failed to parse filter chain '{spec}': {e}"),
            })?;
        graph.validate().map_err(|e| SplitXError::Encode {
            message: format!("Failed to validate filter chain '{spec}': {e}"),
        })?;

        debug!("Filter chain: {spec}");
        Ok(graph)
    }

    /// Push one decoded frame (or EOF when `decoded` is `None`) into the
    /// filter graph and encode everything the graph yields.
    #[allow(clippy::too_many_arguments)]
    fn filter_and_encode(
        &self,
        graph: &mut filter::Graph,
        encoder: &mut ffmpeg::encoder::Video,
        octx: &mut format::context::Output,
        decoded: Option<&ffmpeg::frame::Video>,
        frame_time_base: Rational,
        out_time_base: Rational,
        frames_encoded: &mut u64,
    ) -> SplitXResult<()> {
        {
            let mut source = graph.get("in").ok_or_else(|| SplitXError::Encode {
                message: "Filter graph lost its buffer source".to_string(),
            })?;
            match decoded {
                Some(frame) => {
                    source
                        .source()
                        .add(frame)
                        .map_err(|e| SplitXError::Encode {
                            message: format!("Failed to feed frame to filter chain: {e}"),
                        })?;
                }
                None => {
                    source.source().flush().map_err(|e| SplitXError::Encode {
                        message: format!("Failed to flush filter chain: {e}"),
                    })?;
                }
            }
        }

        let mut filtered = ffmpeg::frame::Video::empty();
        loop {
            let got = {
                let mut sink = graph.get("out").ok_or_else(|| SplitXError::Encode {
                    message: "Filter graph lost its buffer sink".to_string(),
                })?;
                sink.sink().frame(&mut filtered).is_ok()
            };
            if !got {
                break;
            }

            // The fps filter spaces output frames at exactly 1/fps; restamp
            // with a plain counter in the same timebase so output timing is
            // monotonic from zero regardless of source jitter.
            filtered.set_pts(Some(*frames_encoded as i64));
            encoder
                .send_frame(&filtered)
                .map_err(|e| SplitXError::Encode {
                    message: format!("Failed to send frame to encoder: {e}"),
                })?;
            *frames_encoded += 1;

            Self::drain_encoder(encoder, octx, frame_time_base, out_time_base)?;
        }

        Ok(())
    }

    /// Write all packets the encoder currently has ready.
    fn drain_encoder(
        encoder: &mut ffmpeg::encoder::Video,
        octx: &mut format::context::Output,
        frame_time_base: Rational,
        out_time_base: Rational,
    ) -> SplitXResult<()> {
        let mut packet = codec::packet::Packet::empty();
        while encoder.receive_packet(&mut packet).is_ok() {
            packet.set_stream(0);
            packet.rescale_ts(frame_time_base, out_time_base);
            packet
                .write_interleaved(octx)
                .map_err(|e| SplitXError::Encode {
                    message: format!("Failed to write encoded packet: {e}"),
                })?;
        }
        Ok(())
    }
}

use crate::media::{LocalTrack, TrackKind};
use std::sync::Arc;
use uuid::Uuid;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

const PLACEHOLDER_STREAM_ID: &str = "tincan-local";

/// A silent stand-in for a muted or missing microphone. Starts disabled,
/// mirroring a muted device.
pub fn silent_audio_track() -> LocalTrack {
    let track = Arc::new(TrackLocalStaticSample::new(
        RTCRtpCodecCapability {
            mime_type: MIME_TYPE_OPUS.to_owned(),
            clock_rate: 48000,
            channels: 2,
            ..Default::default()
        },
        format!("audio-{}", Uuid::new_v4()),
        PLACEHOLDER_STREAM_ID.to_owned(),
    ));
    LocalTrack::placeholder(TrackKind::Audio, false, track)
}

/// A static single-color stand-in for a disabled or missing camera.
pub fn solid_color_video_track() -> LocalTrack {
    let track = Arc::new(TrackLocalStaticSample::new(
        RTCRtpCodecCapability {
            mime_type: MIME_TYPE_VP8.to_owned(),
            clock_rate: 90000,
            ..Default::default()
        },
        format!("video-{}", Uuid::new_v4()),
        PLACEHOLDER_STREAM_ID.to_owned(),
    ));
    LocalTrack::placeholder(TrackKind::Video, true, track)
}

pub fn placeholder_track(kind: TrackKind) -> LocalTrack {
    match kind {
        TrackKind::Audio => silent_audio_track(),
        TrackKind::Video => solid_color_video_track(),
    }
}

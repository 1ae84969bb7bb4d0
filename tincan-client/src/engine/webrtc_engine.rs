use crate::engine::{EngineConfig, EngineEvent, EngineFactory, NegotiationEngine, RemoteTrack};
use crate::media::{LocalTrack, TrackKind};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tincan_core::{IceCandidateInit, SdpKind, SessionDescription};
use tokio::sync::{Mutex, mpsc};
use tracing::info;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_sender::RTCRtpSender;

/// Production negotiation engine backed by the native `webrtc` stack.
pub struct WebRtcEngine {
    peer_connection: Arc<RTCPeerConnection>,
    senders: Mutex<HashMap<TrackKind, Arc<RTCRtpSender>>>,
}

impl WebRtcEngine {
    pub async fn new(config: &EngineConfig, event_tx: mpsc::Sender<EngineEvent>) -> Result<Self> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|s| RTCIceServer {
                    urls: s.urls.clone(),
                    username: s.username.clone().unwrap_or_default(),
                    credential: s.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                let _ = tx
                    .send(EngineEvent::CandidateDiscovered(IceCandidateInit {
                        candidate: init.candidate,
                        sdp_mid: init.sdp_mid,
                        sdp_m_line_index: init.sdp_mline_index,
                    }))
                    .await;
            })
        }));

        let track_tx = event_tx.clone();
        peer_connection.on_track(Box::new(move |track, _receiver, _transceiver| {
            let tx = track_tx.clone();

            Box::pin(async move {
                let kind = match track.kind() {
                    RTPCodecType::Audio => TrackKind::Audio,
                    _ => TrackKind::Video,
                };
                let _ = tx
                    .send(EngineEvent::RemoteTrack(RemoteTrack {
                        kind,
                        id: track.id(),
                    }))
                    .await;
            })
        }));

        let state_tx = event_tx;
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();

                Box::pin(async move {
                    info!("Peer connection state changed: {:?}", s);
                    match s {
                        RTCPeerConnectionState::Failed
                        | RTCPeerConnectionState::Disconnected
                        | RTCPeerConnectionState::Closed => {
                            let _ = tx.send(EngineEvent::ConnectionLost).await;
                        }
                        _ => {}
                    }
                })
            },
        ));

        Ok(Self {
            peer_connection,
            senders: Mutex::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl NegotiationEngine for WebRtcEngine {
    async fn create_offer(&self) -> Result<SessionDescription> {
        let offer = self.peer_connection.create_offer(None).await?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription> {
        let answer = self.peer_connection.create_answer(None).await?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_remote_description(&self, description: SessionDescription) -> Result<()> {
        let desc = match description.kind {
            SdpKind::Offer => RTCSessionDescription::offer(description.sdp)?,
            SdpKind::Answer => RTCSessionDescription::answer(description.sdp)?,
        };
        self.peer_connection.set_remote_description(desc).await?;
        Ok(())
    }

    async fn add_ice_candidate(&self, candidate: IceCandidateInit) -> Result<()> {
        self.peer_connection
            .add_ice_candidate(RTCIceCandidateInit {
                candidate: candidate.candidate,
                sdp_mid: candidate.sdp_mid,
                sdp_mline_index: candidate.sdp_m_line_index,
                username_fragment: None,
            })
            .await
            .context("Failed to add ICE candidate")?;
        Ok(())
    }

    async fn add_track(&self, track: &LocalTrack) -> Result<()> {
        let sender = self.peer_connection.add_track(track.rtc_track()).await?;
        self.senders.lock().await.insert(track.kind, sender);
        Ok(())
    }

    async fn replace_track(&self, track: &LocalTrack) -> Result<()> {
        let sender = self.senders.lock().await.get(&track.kind).cloned();
        match sender {
            Some(sender) => {
                sender.replace_track(Some(track.rtc_track())).await?;
                Ok(())
            }
            None => self.add_track(track).await,
        }
    }

    async fn has_sender(&self, kind: TrackKind) -> bool {
        self.senders.lock().await.contains_key(&kind)
    }

    async fn close(&self) -> Result<()> {
        // Detach callbacks before closing so nothing fires into a session
        // that is being torn down.
        self.peer_connection
            .on_ice_candidate(Box::new(|_| Box::pin(async {})));
        self.peer_connection
            .on_track(Box::new(|_, _, _| Box::pin(async {})));
        self.peer_connection
            .on_peer_connection_state_change(Box::new(|_| Box::pin(async {})));

        self.peer_connection.close().await?;
        Ok(())
    }
}

/// Builds `WebRtcEngine`s. The default factory for real sessions.
#[derive(Default)]
pub struct WebRtcEngineFactory;

#[async_trait]
impl EngineFactory for WebRtcEngineFactory {
    async fn create(
        &self,
        config: &EngineConfig,
        events: mpsc::Sender<EngineEvent>,
    ) -> Result<Arc<dyn NegotiationEngine>> {
        let engine = WebRtcEngine::new(config, events).await?;
        Ok(Arc::new(engine))
    }
}

//! Multicast Ingestor (MI, spec §4.1).
//!
//! One background task per configured multicast group. Each task joins its
//! group on the configured local interface, receives datagrams with a 5s
//! recv timeout, rejects anything outside the TR-code whitelist, classifies
//! the rest via [`SymbolClassifier`], wraps the payload in a capture
//! envelope and publishes it to the bus.

use std::net::{SocketAddr, SocketAddrV4, UdpSocket as StdUdpSocket};
use std::sync::Arc;
use std::time::Duration;

use krx_core::config::MulticastGroupConfig;
use krx_core::stats::IngestStats;
use krx_core::types::wire;
use krx_core::types::CaptureEnvelope;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::bus::Bus;
use crate::classifier::SymbolClassifier;

/// Maximum datagram size read per recv (spec §4.1: 2048 bytes).
const MAX_PACKET_SIZE: usize = 2048;

/// Spawn one receive task per multicast group and return their join handles.
///
/// Each task runs until cancelled (the caller is expected to abort the
/// returned handles, e.g. on `ctrl_c`, since the loop itself never returns
/// under normal operation).
pub fn spawn_groups(
    groups: Vec<MulticastGroupConfig>,
    recv_timeout_secs: u64,
    classifier: Arc<SymbolClassifier>,
    bus: Arc<Bus>,
    stats: Arc<IngestStats>,
) -> Vec<tokio::task::JoinHandle<()>> {
    groups
        .into_iter()
        .map(|group| {
            let classifier = classifier.clone();
            let bus = bus.clone();
            let stats = stats.clone();
            tokio::spawn(async move {
                if let Err(e) = run_group(group, recv_timeout_secs, classifier, bus, stats).await {
                    error!("multicast group {}:{} exited: {e}", group.group, group.port);
                }
            })
        })
        .collect()
}

async fn run_group(
    group: MulticastGroupConfig,
    recv_timeout_secs: u64,
    classifier: Arc<SymbolClassifier>,
    bus: Arc<Bus>,
    stats: Arc<IngestStats>,
) -> anyhow::Result<()> {
    let socket = bind_multicast(&group)?;
    let timeout_dur = Duration::from_secs(recv_timeout_secs);
    let mut buf = vec![0u8; MAX_PACKET_SIZE];

    info!("joined multicast group {}:{} (side={:?})", group.group, group.port, group.side);

    loop {
        let recv = match timeout(timeout_dur, socket.recv_from(&mut buf)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("no data from {}:{} in {recv_timeout_secs}s", group.group, group.port);
                continue;
            }
        };

        let (len, _from) = match recv {
            Ok(pair) => pair,
            Err(e) => {
                stats.record_socket_error();
                warn!("recv error on {}:{}: {e}", group.group, group.port);
                continue;
            }
        };

        let payload = &buf[..len];

        if !wire::is_whitelisted_tr_code(payload) {
            stats.record_rejected_tr();
            continue;
        }

        let Some(prefix) = wire::prefix6(payload) else {
            stats.record_rejected_tr();
            continue;
        };

        let capture_time_sec = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system clock is after the Unix epoch")
            .as_secs_f64();

        let stream = classifier.classify(group.side, prefix);
        let envelope = CaptureEnvelope { capture_time_sec, source_port: group.port, payload: payload.to_vec() };

        bus.publish(stream, envelope);
        stats.record_accepted(stream);
    }
}

/// Bind and join a multicast group, converting the resulting std socket into
/// a tokio one. `std::net::UdpSocket::join_multicast_v4` does the IGMP join;
/// tokio's `UdpSocket` has no native join method on non-Unix platforms, so
/// the join happens on the std socket before handing it to the runtime.
fn bind_multicast(group: &MulticastGroupConfig) -> anyhow::Result<UdpSocket> {
    let bind_addr = SocketAddr::V4(SocketAddrV4::new(std::net::Ipv4Addr::UNSPECIFIED, group.port));
    let std_socket = StdUdpSocket::bind(bind_addr)?;
    std_socket.join_multicast_v4(&group.group, &group.interface)?;
    std_socket.set_nonblocking(true)?;
    Ok(UdpSocket::from_std(std_socket)?)
}

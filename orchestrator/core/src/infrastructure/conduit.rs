// Copyright (c) 2026 Sortie Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Report Conduit
//!
//! A conduit is the single-writer, single-reader channel pair that moves
//! `MissionReport`s from a dispatched child back to whoever dispatched
//! it. The dispatcher creates the pair, hands the sender down, and keeps
//! the receiver; the child never outlives its conduit.
//!
//! Contention is avoided by construction: every dispatched unit gets its
//! own private pair, so there is never more than one writer per channel.

use crate::domain::MissionReport;
use tokio::sync::mpsc;

/// Create a fresh conduit pair for one dispatched child.
///
/// The channel is bounded at one slot: each dispatched unit sends
/// exactly one rolled-up report, so the sender never blocks even when
/// the receiver has not been polled yet.
pub fn conduit() -> (ReportSender, ReportReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (ReportSender { tx }, ReportReceiver { rx })
}

/// Child-side half of a conduit. Sends reports upward.
pub struct ReportSender {
    tx: mpsc::Sender<MissionReport>,
}

impl ReportSender {
    /// Send one report to the dispatching parent.
    pub async fn send(&self, report: MissionReport) -> Result<(), ConduitError> {
        self.tx.send(report).await.map_err(|_| ConduitError::Closed)
    }
}

/// Parent-side half of a conduit. Receives reports from one child.
pub struct ReportReceiver {
    rx: mpsc::Receiver<MissionReport>,
}

impl ReportReceiver {
    /// Receive the child's report, suspending until it arrives.
    ///
    /// Fails only if the child dropped its sender without reporting,
    /// which means the child task died before completing its contract.
    pub async fn recv(&mut self) -> Result<MissionReport, ConduitError> {
        self.rx.recv().await.ok_or(ConduitError::Closed)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConduitError {
    #[error("report conduit closed before a report was delivered")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_crosses_conduit() {
        let (tx, mut rx) = conduit();

        tx.send(MissionReport::success("leaf", "done"))
            .await
            .unwrap();

        let report = rx.recv().await.unwrap();
        assert_eq!(report.subject, "leaf");
    }

    #[tokio::test]
    async fn test_send_buffers_before_receive() {
        // A dispatched unit must be able to complete its send even if
        // the parent has not started receiving yet.
        let (tx, mut rx) = conduit();
        tx.send(MissionReport::success("leaf", "done"))
            .await
            .unwrap();
        drop(tx);
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_recv_fails_when_sender_dropped_silent() {
        let (tx, mut rx) = conduit();
        drop(tx);
        assert!(matches!(rx.recv().await, Err(ConduitError::Closed)));
    }

    #[tokio::test]
    async fn test_send_fails_when_receiver_dropped() {
        let (tx, rx) = conduit();
        drop(rx);
        let result = tx.send(MissionReport::success("leaf", "done")).await;
        assert!(matches!(result, Err(ConduitError::Closed)));
    }
}

use std::time::Duration;

use cp_core::ClipEntry;
use tokio::sync::{mpsc, oneshot};

use super::error::PollerError;

pub(crate) type PollerCommandSender = mpsc::Sender<PollerCommand>;
pub(crate) type PollerCommandReceiver = mpsc::Receiver<PollerCommand>;

/// Requests handled by the worker between ticks. Every variant except
/// `Shutdown` is answered once the worker has applied it.
pub(crate) enum PollerCommand {
    /// 重设轮询间隔
    Reconfigure {
        interval: Duration,
        ack: oneshot::Sender<()>,
    },
    /// 修改历史容量
    SetCapacity {
        capacity: usize,
        ack: oneshot::Sender<()>,
    },
    /// 读取历史快照
    Snapshot {
        reply: oneshot::Sender<Vec<ClipEntry>>,
    },
    /// 恢复条目到剪贴板
    Restore {
        text: String,
        reply: oneshot::Sender<Result<ClipEntry, PollerError>>,
    },
    /// 关闭
    Shutdown,
}

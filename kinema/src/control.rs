use std::sync::mpsc::{Receiver, Sender, channel};

use serde::{Deserialize, Serialize};

use crate::simulation::camera::Unit;

/// A request applied to a runtime between frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeCommand {
    Pause,
    Resume,
    Reset,
    SetZoom(f64),
    ZoomBy(f64),
    SetPan(f64, f64),
    PanBy(f64, f64),
    ResetView,
    SetUnit(Unit),
}

pub struct CommandQueue {
    receiver: Receiver<RuntimeCommand>,
}

#[derive(Clone)]
pub struct CommandSender {
    sender: Sender<RuntimeCommand>,
}

impl CommandQueue {
    pub fn new() -> (Self, CommandSender) {
        let (sender, receiver) = channel();
        (Self { receiver }, CommandSender { sender })
    }

    pub fn try_recv(&self) -> Option<RuntimeCommand> {
        self.receiver.try_recv().ok()
    }
}

impl CommandSender {
    /// Queues `cmd`. Returns `false` once the queue has been dropped.
    pub fn send(&self, cmd: RuntimeCommand) -> bool {
        self.sender.send(cmd).is_ok()
    }
}

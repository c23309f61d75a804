//! In-proc event bus between the transport and the dispatcher

use tokio::sync::mpsc;

use crate::event::InboundEvent;

pub struct EventBus {
    sender: mpsc::Sender<InboundEvent>,
    receiver: mpsc::Receiver<InboundEvent>,
}

impl EventBus {
    pub fn new(buffer: usize) -> Self {
        let (sender, receiver) = mpsc::channel(buffer);
        Self { sender, receiver }
    }

    /// A handle the transport pushes events through
    pub fn sender(&self) -> mpsc::Sender<InboundEvent> {
        self.sender.clone()
    }

    /// Drop the bus' own sender and keep the receiving end
    ///
    /// The receiver yields `None` once every handle from [`Self::sender`]
    /// has been dropped.
    pub fn into_receiver(self) -> mpsc::Receiver<InboundEvent> {
        self.receiver
    }
}

use super::{drift_message, reflection_message, ReflectionRequest, TextGenerator};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Context a request was issued in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTag {
    /// Reflection for the slot completed on `day_index`
    Reflection { day_index: usize, slot_id: Uuid },
    /// Nudge for the slot that was active when drift was seen
    Drift { slot_id: Uuid },
}

/// A finished request, ready to be shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub tag: MessageTag,
    pub text: String,
}

/// Runs message requests off the UI thread
///
/// Requests are fire-and-forget; replies queue up until the event loop
/// drains them with `try_recv`.
pub struct Broker {
    runtime: Runtime,
    generator: Arc<dyn TextGenerator>,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl Broker {
    pub fn new(generator: Arc<dyn TextGenerator>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("twelve-days-oracle")
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            runtime,
            generator,
            tx,
            rx,
        })
    }

    pub fn request_reflection(&self, slot_id: Uuid, request: ReflectionRequest) {
        let tag = MessageTag::Reflection {
            day_index: request.day_index,
            slot_id,
        };
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        tracing::debug!(day = request.day_index, %slot_id, "requesting reflection");

        self.runtime.spawn(async move {
            let text = reflection_message(generator.as_ref(), &request).await;
            // The receiver only goes away at shutdown
            let _ = tx.send(Reply { tag, text });
        });
    }

    pub fn request_drift(&self, slot_id: Uuid, mode_label: &'static str) {
        let tag = MessageTag::Drift { slot_id };
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        tracing::debug!(%slot_id, mode = mode_label, "requesting drift nudge");

        self.runtime.spawn(async move {
            let text = drift_message(generator.as_ref(), mode_label).await;
            let _ = tx.send(Reply { tag, text });
        });
    }

    /// Next finished reply, if any
    pub fn try_recv(&self) -> Option<Reply> {
        self.rx.try_recv().ok()
    }

    #[cfg(test)]
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Reply> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MentalState;
    use crate::oracle::testing::ScriptedGenerator;
    use crate::oracle::{DRIFT_FALLBACK, REFLECTION_FALLBACK};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_reflection_reply_carries_tag() {
        let broker = Broker::new(Arc::new(ScriptedGenerator::answering("Doves rest."))).unwrap();
        let slot_id = Uuid::new_v4();
        let mut usage = BTreeMap::new();
        usage.insert(MentalState::Focus, 1);

        broker.request_reflection(
            slot_id,
            ReflectionRequest {
                day_index: 4,
                completed_tasks: 1,
                mode_usage: usage,
            },
        );

        let reply = broker.recv_timeout(WAIT).expect("reply arrives");
        assert_eq!(
            reply,
            Reply {
                tag: MessageTag::Reflection { day_index: 4, slot_id },
                text: "Doves rest.".to_string(),
            }
        );
    }

    #[test]
    fn test_failures_become_fallbacks() {
        let broker = Broker::new(Arc::new(ScriptedGenerator::failing())).unwrap();
        let slot_id = Uuid::new_v4();

        broker.request_drift(slot_id, "Soft Mode");
        let reply = broker.recv_timeout(WAIT).expect("reply arrives");
        assert_eq!(reply.tag, MessageTag::Drift { slot_id });
        assert_eq!(reply.text, DRIFT_FALLBACK);

        broker.request_reflection(
            slot_id,
            ReflectionRequest {
                day_index: 0,
                completed_tasks: 0,
                mode_usage: BTreeMap::new(),
            },
        );
        let reply = broker.recv_timeout(WAIT).expect("reply arrives");
        assert_eq!(reply.text, REFLECTION_FALLBACK);
    }

    #[test]
    fn test_try_recv_empty() {
        let broker = Broker::new(Arc::new(ScriptedGenerator::answering("x"))).unwrap();
        assert!(broker.try_recv().is_none());
    }
}

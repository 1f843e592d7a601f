use std::sync::Mutex;

use async_trait::async_trait;
use digestbot::errors::RelayError;
use digestbot::worker::deliver::{Deliver, broadcast};

#[derive(Default)]
struct RecordingDelivery {
    fail_for: Vec<i64>,
    sent: Mutex<Vec<(i64, String)>>,
}

#[async_trait]
impl Deliver for RecordingDelivery {
    async fn deliver(&self, recipient: i64, text: &str) -> Result<(), RelayError> {
        if self.fail_for.contains(&recipient) {
            return Err(RelayError::Delivery(format!(
                "recipient {} unreachable",
                recipient
            )));
        }
        self.sent.lock().unwrap().push((recipient, text.to_string()));
        Ok(())
    }
}

#[tokio::test]
async fn partial_failure_does_not_block_other_recipients() {
    let delivery = RecordingDelivery {
        fail_for: vec![1],
        ..Default::default()
    };

    broadcast(&delivery, "digest", &[1, 2]).await;

    let sent = delivery.sent.lock().unwrap();
    assert_eq!(sent.as_slice(), &[(2, "digest".to_string())]);
}

#[tokio::test]
async fn broadcast_reaches_every_recipient() {
    let delivery = RecordingDelivery::default();

    broadcast(&delivery, "digest", &[10, 20, 30]).await;

    let sent = delivery.sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    for (_, text) in sent.iter() {
        assert_eq!(text, "digest");
    }
}

#[tokio::test]
async fn broadcast_with_no_recipients_is_a_noop() {
    let delivery = RecordingDelivery::default();

    broadcast(&delivery, "digest", &[]).await;

    assert!(delivery.sent.lock().unwrap().is_empty());
}

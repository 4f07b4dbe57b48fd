use crate::service::data_manager::{DataRetrievalError, DataRetrievalResult};
use std::sync::mpsc::{Receiver, TryRecvError};

/// A background result tagged with the selection generation it was requested under.
pub struct AsyncData<T> {
    generation: u64,
    receiver: Receiver<DataRetrievalResult<T>>,
}

impl<T> AsyncData<T> {
    pub fn new(generation: u64, receiver: Receiver<DataRetrievalResult<T>>) -> Self {
        Self { generation, receiver }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `None` while the worker is still running.
    pub fn try_take(&self) -> Option<DataRetrievalResult<T>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            // Sender dropped without sending
            Err(TryRecvError::Disconnected) => Some(Err(DataRetrievalError::WorkerDisconnected)),
        }
    }
}

/// Removes every finished task from `tasks`, returning `(generation, result)` pairs in dispatch order.
pub fn drain_finished<T>(tasks: &mut Vec<AsyncData<T>>) -> Vec<(u64, DataRetrievalResult<T>)> {
    let mut finished = Vec::new();
    tasks.retain(|task| match task.try_take() {
        Some(result) => {
            finished.push((task.generation(), result));
            false
        }
        None => true,
    });
    finished
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn pending_task_stays_queued() {
        let (tx, rx) = mpsc::channel::<DataRetrievalResult<u8>>();
        let mut tasks = vec![AsyncData::new(1, rx)];

        assert!(drain_finished(&mut tasks).is_empty());
        assert_eq!(tasks.len(), 1);

        tx.send(Ok(7)).unwrap();
        let finished = drain_finished(&mut tasks);
        assert!(tasks.is_empty());
        assert!(matches!(finished.as_slice(), [(1, Ok(7))]));
    }

    #[test]
    fn dropped_sender_reports_disconnect() {
        let (tx, rx) = mpsc::channel::<DataRetrievalResult<u8>>();
        drop(tx);

        let task = AsyncData::new(3, rx);
        assert!(matches!(task.try_take(), Some(Err(DataRetrievalError::WorkerDisconnected))));
    }
}

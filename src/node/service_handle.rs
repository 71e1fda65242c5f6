use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Running gateway tasks plus the watch channel that stops them.
pub struct ServiceHandle {
    shutdown_tx: watch::Sender<bool>,
    join_handles: Vec<JoinHandle<anyhow::Result<()>>>,
}

impl ServiceHandle {
    /// Create a handle and the receiver tasks should observe.
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { shutdown_tx: tx, join_handles: vec![] }, rx)
    }

    pub fn attach(&mut self, h: JoinHandle<anyhow::Result<()>>) {
        self.join_handles.push(h);
    }

    /// Number of attached tasks that have not finished yet.
    pub fn running(&self) -> usize {
        self.join_handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Signal shutdown and wait for every task. The first task error is
    /// returned after all tasks have been joined.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        let _ = self.shutdown_tx.send(true);

        let mut first_err = None;
        for h in self.join_handles {
            match h.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!("service task returned error: {:?}", e);
                    first_err.get_or_insert(e);
                }
                Err(e) => {
                    tracing::error!("task join error: {:?}", e);
                    first_err.get_or_insert(e.into());
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

//! 拖动请求合并
//!
//! 拖动时每次移动都会更新本地显示，但网络请求按尾沿合并：
//! 窗口内的多次更新只发送最后一个值，拖动结束时的值一定会发出。

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tracing::trace;

pub struct Coalescer {
    tx: watch::Sender<Option<i64>>,
}

impl Coalescer {
    /// 启动后台任务；必须在 tokio 运行时内调用
    ///
    /// Coalescer 被丢弃后任务随之结束。
    pub fn spawn<F, Fut>(window: Duration, sink: F) -> Self
    where
        F: Fn(i64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = watch::channel(None::<i64>);

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                tokio::time::sleep(window).await;
                let latest = *rx.borrow_and_update();
                if let Some(value) = latest {
                    trace!("flushing coalesced value {}", value);
                    sink(value).await;
                }
            }
        });

        Self { tx }
    }

    pub fn push(&self, value: i64) {
        self.tx.send_replace(Some(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test(start_paused = true)]
    async fn burst_sends_only_last_value() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink_sent = sent.clone();
        let coalescer = Coalescer::spawn(Duration::from_millis(100), move |v| {
            let sink_sent = sink_sent.clone();
            async move { sink_sent.lock().unwrap().push(v) }
        });

        for v in 1..=8 {
            coalescer.push(v);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(*sent.lock().unwrap(), vec![8]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_each_flush() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sink_sent = sent.clone();
        let coalescer = Coalescer::spawn(Duration::from_millis(50), move |v| {
            let sink_sent = sink_sent.clone();
            async move { sink_sent.lock().unwrap().push(v) }
        });

        coalescer.push(3);
        tokio::time::sleep(Duration::from_millis(120)).await;
        coalescer.push(9);
        tokio::time::sleep(Duration::from_millis(120)).await;

        assert_eq!(*sent.lock().unwrap(), vec![3, 9]);
    }
}

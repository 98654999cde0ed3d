//! Single-writer record store. A dedicated worker thread owns the
//! `Database` and serializes every read, write, and live-query refresh,
//! so each derivation sees a consistent snapshot and subscribers observe
//! emissions in write order.

use anyhow::{anyhow, Context, Result};
use std::any::Any;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use tokio::sync::watch;

use crate::db::Database;

/// Record kinds a write can touch. Live queries subscribe to one or more
/// of these and are refreshed only when a matching write lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Table {
    Transactions,
    Categories,
    Goals,
}

type AnyBox = Box<dyn Any + Send>;
type WriteJob = Box<dyn FnOnce(&mut Database) -> Result<AnyBox> + Send>;
type ReadJob = Box<dyn FnOnce(&Database) -> Result<AnyBox> + Send>;
type RegisterJob = Box<dyn FnOnce(&Database, &mut Vec<Watcher>) + Send>;

enum Msg {
    Exec {
        tables: &'static [Table],
        job: WriteJob,
        reply: mpsc::Sender<Result<AnyBox>>,
    },
    Query {
        job: ReadJob,
        reply: mpsc::Sender<Result<AnyBox>>,
    },
    Watch(RegisterJob),
}

struct Watcher {
    tables: &'static [Table],
    /// Recomputes and republishes; returns false once every subscriber
    /// handle has been dropped, so the worker can drop the entry.
    refresh: Box<dyn FnMut(&Database) -> bool + Send>,
}

/// Handle to a live query: always holds the latest result, re-published
/// after every write touching a subscribed table. Cloning shares the
/// same underlying subscription; dropping all clones unregisters it.
#[derive(Clone)]
pub(crate) struct Live<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> Live<T> {
    /// Current value.
    pub(crate) fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// True if a value newer than the last `latest()` call is available.
    pub(crate) fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Current value, marking it as seen for `has_changed`.
    pub(crate) fn latest(&mut self) -> T {
        self.rx.borrow_and_update().clone()
    }
}

pub(crate) struct Store {
    tx: mpsc::Sender<Msg>,
}

impl Store {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        Self::new(Database::open(path)?)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        Self::new(Database::open_in_memory()?)
    }

    fn new(db: Database) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<Msg>();
        thread::Builder::new()
            .name("fintui-store".into())
            .spawn(move || run_worker(db, rx))
            .context("Failed to spawn the store worker thread")?;
        Ok(Self { tx })
    }

    /// Run a mutating job on the worker. Returns once the write is
    /// applied; live queries touching `tables` refresh right after the
    /// ack, before the worker picks up its next message.
    pub(crate) fn exec<T, F>(&self, tables: &'static [Table], job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(Msg::Exec {
                tables,
                job: Box::new(move |db| job(db).map(|v| Box::new(v) as AnyBox)),
                reply: reply_tx,
            })
            .map_err(|_| anyhow!("Store worker has shut down"))?;
        recv_reply(&reply_rx)
    }

    /// Run a read-only job on the worker. Because the worker is a single
    /// serial loop, a query issued after a write ack observes that write
    /// and every view refresh it triggered.
    pub(crate) fn query<T, F>(&self, job: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(Msg::Query {
                job: Box::new(move |db| job(db).map(|v| Box::new(v) as AnyBox)),
                reply: reply_tx,
            })
            .map_err(|_| anyhow!("Store worker has shut down"))?;
        recv_reply(&reply_rx)
    }

    /// Register a live query over the given tables. The initial value is
    /// computed before this returns; afterwards the query is re-run and
    /// re-published after every write touching one of `tables`.
    pub(crate) fn watch<T, F>(&self, tables: &'static [Table], query: F) -> Result<Live<T>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&Database) -> Result<T> + Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();
        self.tx
            .send(Msg::Watch(Box::new(move |db, watchers| {
                match query(db) {
                    Ok(initial) => {
                        let (value_tx, value_rx) = watch::channel(initial);
                        watchers.push(Watcher {
                            tables,
                            refresh: Box::new(move |db| {
                                if value_tx.is_closed() {
                                    return false;
                                }
                                match query(db) {
                                    Ok(v) => {
                                        let _ = value_tx.send(v);
                                    }
                                    // Keep the previous value; one failing
                                    // view must not take down the rest.
                                    Err(e) => log::warn!("Live query refresh failed: {e:#}"),
                                }
                                true
                            }),
                        });
                        let _ = reply_tx.send(Ok(Live { rx: value_rx }));
                    }
                    Err(e) => {
                        let _ = reply_tx.send(Err(e));
                    }
                }
            })))
            .map_err(|_| anyhow!("Store worker has shut down"))?;
        reply_rx
            .recv()
            .map_err(|_| anyhow!("Store worker dropped the reply"))?
    }

    /// Barrier: returns once every message sent before this call has been
    /// processed, including refreshes triggered by earlier writes.
    #[cfg(test)]
    pub(crate) fn sync(&self) -> Result<()> {
        self.query(|_| Ok(()))
    }
}

fn recv_reply<T: 'static>(reply_rx: &mpsc::Receiver<Result<AnyBox>>) -> Result<T> {
    let boxed = reply_rx
        .recv()
        .map_err(|_| anyhow!("Store worker dropped the reply"))??;
    boxed
        .downcast::<T>()
        .map(|v| *v)
        .map_err(|_| anyhow!("Store job returned an unexpected type"))
}

fn run_worker(mut db: Database, rx: mpsc::Receiver<Msg>) {
    let mut watchers: Vec<Watcher> = Vec::new();
    while let Ok(msg) = rx.recv() {
        match msg {
            Msg::Exec { tables, job, reply } => {
                let result = job(&mut db);
                let ok = result.is_ok();
                // Ack first: mutation callers never wait on view refresh.
                let _ = reply.send(result);
                if ok {
                    refresh_watchers(&db, &mut watchers, tables);
                }
            }
            Msg::Query { job, reply } => {
                let _ = reply.send(job(&db));
            }
            Msg::Watch(register) => register(&db, &mut watchers),
        }
    }
    log::debug!("Store worker shutting down");
}

fn refresh_watchers(db: &Database, watchers: &mut Vec<Watcher>, touched: &[Table]) {
    watchers.retain_mut(|w| {
        if !w.tables.iter().any(|t| touched.contains(t)) {
            return true;
        }
        (w.refresh)(db)
    });
}

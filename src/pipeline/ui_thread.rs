//! UI thread - Single-thread affinity for all native mutation.
//!
//! The [`Coordinator`] and every native view live on one thread, held in a
//! thread-local. Inbound calls may come from anywhere through a [`UiHandle`]:
//!
//! ```text
//! caller thread                         UI thread
//! ─────────────                         ─────────
//! UiHandle::call ──► Command::Call ──►  recv() ──► coordinator.handle()
//!       ▲                                                 │
//!       └────────────── reply channel ◄───────────────────┘
//! ```
//!
//! A call made on the UI thread itself runs inline, without a round trip.
//! Two ways to own the UI thread:
//!
//! - [`UiThread::spawn`]: a dedicated thread blocks on the command channel.
//! - [`UiThread::attach_current`]: the host keeps its own main loop and
//!   calls [`UiThread::pump`] to drain pending commands.

use std::cell::RefCell;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle, ThreadId};

use serde_json::Value;
use tracing::{debug, info, warn};

use super::coordinator::Coordinator;
use super::events::{EventChannel, OutboundEvent};
use super::protocol::MethodCall;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};

// =============================================================================
// UI thread state
// =============================================================================

thread_local! {
    /// The coordinator owned by this thread, if it is the UI thread.
    static COORDINATOR: RefCell<Option<Coordinator>> = const { RefCell::new(None) };
}

/// Run `f` against this thread's coordinator.
///
/// Fails with `Disconnected` off the UI thread and with `Reentrant` when the
/// coordinator is already mid-dispatch further up the stack.
pub fn with_coordinator<R>(
    method: &str,
    f: impl FnOnce(&mut Coordinator) -> R,
) -> BridgeResult<R> {
    COORDINATOR.with(|slot| {
        let mut slot = slot
            .try_borrow_mut()
            .map_err(|_| BridgeError::Reentrant(method.to_string()))?;
        let coordinator = slot.as_mut().ok_or(BridgeError::Disconnected)?;
        Ok(f(coordinator))
    })
}

fn install(coordinator: Coordinator) {
    COORDINATOR.with(|slot| {
        *slot.borrow_mut() = Some(coordinator);
    });
}

fn uninstall() -> Option<Coordinator> {
    COORDINATOR.with(|slot| slot.try_borrow_mut().ok().and_then(|mut slot| slot.take()))
}

// =============================================================================
// Commands
// =============================================================================

enum Command {
    Call {
        call: MethodCall,
        reply: Sender<BridgeResult<Value>>,
    },
    HostReady {
        reply: Sender<BridgeResult<Value>>,
    },
    Shutdown,
}

/// Run one command on the UI thread. Returns `false` on shutdown.
fn process(command: Command) -> bool {
    match command {
        Command::Call { call, reply } => {
            let method = call.method.clone();
            let result = with_coordinator(&method, |c| c.handle(call)).and_then(|r| r);
            if reply.send(result).is_err() {
                debug!(method = %method, "caller gone before reply");
            }
            true
        }
        Command::HostReady { reply } => {
            let result = with_coordinator("hostReady", |c| {
                c.host_ready();
                Value::Bool(true)
            });
            let _ = reply.send(result);
            true
        }
        Command::Shutdown => false,
    }
}

// =============================================================================
// UiHandle
// =============================================================================

/// Inbound entry point, usable from any thread.
#[derive(Clone)]
pub struct UiHandle {
    commands: Sender<Command>,
    ui_thread: ThreadId,
}

impl UiHandle {
    /// Whether the calling thread is the UI thread.
    pub fn is_ui_thread(&self) -> bool {
        thread::current().id() == self.ui_thread
    }

    /// Run a call on the UI thread and wait for its result.
    pub fn call(&self, call: MethodCall) -> BridgeResult<Value> {
        if self.is_ui_thread() {
            let method = call.method.clone();
            return with_coordinator(&method, |c| c.handle(call)).and_then(|r| r);
        }

        let (reply, result) = mpsc::channel();
        self.commands
            .send(Command::Call { call, reply })
            .map_err(|_| BridgeError::Disconnected)?;
        result.recv().map_err(|_| BridgeError::Disconnected)?
    }

    /// Convenience wrapper around [`UiHandle::call`].
    pub fn invoke(&self, method: &str, args: Value) -> BridgeResult<Value> {
        self.call(MethodCall::new(method, args))
    }

    /// Signal that the host UI stack is ready.
    pub fn host_ready(&self) -> BridgeResult<()> {
        if self.is_ui_thread() {
            return with_coordinator("hostReady", |c| c.host_ready());
        }

        let (reply, result) = mpsc::channel();
        self.commands
            .send(Command::HostReady { reply })
            .map_err(|_| BridgeError::Disconnected)?;
        result.recv().map_err(|_| BridgeError::Disconnected)?.map(|_| ())
    }
}

// =============================================================================
// UiThread
// =============================================================================

/// Owner of the UI thread.
///
/// Dropping it stops a spawned thread (after the commands already queued)
/// or removes the coordinator from the attached thread.
pub struct UiThread {
    handle: UiHandle,
    running: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
    /// Command receiver when the host pumps its own loop.
    pump: Option<Receiver<Command>>,
}

impl UiThread {
    /// Start a dedicated UI thread.
    ///
    /// `setup` runs on the new thread before any call is processed; use it
    /// to register components or to signal host readiness.
    pub fn spawn<F>(config: BridgeConfig, setup: F) -> io::Result<(Self, Receiver<OutboundEvent>)>
    where
        F: FnOnce(&mut Coordinator) + Send + 'static,
    {
        let (commands, inbox) = mpsc::channel::<Command>();
        let (event_tx, event_rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let join = thread::Builder::new()
            .name("dcmaui-ui".to_string())
            .spawn(move || {
                let mut coordinator = Coordinator::new(config, EventChannel::from_sender(event_tx));
                setup(&mut coordinator);
                install(coordinator);
                info!("ui thread started");

                run_loop(&inbox);

                uninstall();
                running_clone.store(false, Ordering::SeqCst);
                info!("ui thread stopped");
            })?;

        let handle = UiHandle {
            commands,
            ui_thread: join.thread().id(),
        };

        Ok((
            Self {
                handle,
                running,
                join: Some(join),
                pump: None,
            },
            event_rx,
        ))
    }

    /// Make the calling thread the UI thread.
    ///
    /// Calls from this thread run inline; calls from other threads wait
    /// until [`UiThread::pump`] runs here.
    pub fn attach_current(coordinator: Coordinator) -> Self {
        let (commands, inbox) = mpsc::channel();
        install(coordinator);

        Self {
            handle: UiHandle {
                commands,
                ui_thread: thread::current().id(),
            },
            running: Arc::new(AtomicBool::new(true)),
            join: None,
            pump: Some(inbox),
        }
    }

    pub fn handle(&self) -> UiHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Process every queued command without blocking. Returns how many ran.
    ///
    /// Only meaningful for an attached thread, and only on that thread.
    pub fn pump(&self) -> usize {
        let Some(inbox) = &self.pump else { return 0 };
        if !self.handle.is_ui_thread() {
            warn!("pump called off the ui thread");
            return 0;
        }

        let mut processed = 0;
        while let Ok(command) = inbox.try_recv() {
            processed += 1;
            if !process(command) {
                self.running.store(false, Ordering::SeqCst);
                break;
            }
        }
        processed
    }

    /// Stop the UI thread and wait for it.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(join) = self.join.take() {
            let _ = self.handle.commands.send(Command::Shutdown);
            if join.join().is_err() {
                warn!("ui thread panicked");
            }
        } else if self.pump.take().is_some() && self.handle.is_ui_thread() {
            uninstall();
        }
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Block on the command channel until shutdown or until every handle is gone.
fn run_loop(inbox: &Receiver<Command>) {
    while let Ok(command) = inbox.recv() {
        if !process(command) {
            break;
        }
    }
}

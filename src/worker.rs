//! Frame worker: a dedicated thread that owns the simulation and talks to its
//! host only through messages.
//!
//! Frames are pulled, not pushed. After emitting a frame the worker holds no
//! buffer and runs nothing until the host hands one back with
//! [`Command::Next`], so rendering speed bounds simulation speed and frames
//! never queue up. Commands are applied between frames in arrival order.

use std::sync::mpsc::{self, Receiver, RecvError, SendError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::config::{ParamUpdate, SimConfig};
use crate::error::LatticeError;
use crate::obstacle::Preset;
use crate::render::Frame;
use crate::simulation::Simulation;

/// host → worker
#[derive(Debug, Clone)]
pub enum Command {
    /// allocate a fresh lattice and start running
    Start(SimConfig),
    Pause,
    Resume,
    /// rest state, obstacles and parameters kept
    Reset,
    Params(ParamUpdate),
    Barrier(Preset),
    DrawBarrier { x: f64, y: f64, radius: f64 },
    /// add random noise to the flow
    Perturb { amplitude: f64 },
    /// return a writable buffer and request the next frame
    Next(Frame),
}

/// worker → host
#[derive(Debug)]
pub enum Event {
    Frame(Frame),
    Error(LatticeError),
}

/// Host side of a running worker.
pub struct WorkerHandle {
    commands: Sender<Command>,
    events: Receiver<Event>,
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn send(&self, command: Command) -> Result<(), SendError<Command>> {
        self.commands.send(command)
    }

    /// block until the worker emits something
    pub fn recv(&self) -> Result<Event, RecvError> {
        self.events.recv()
    }

    pub fn try_recv(&self) -> Result<Event, TryRecvError> {
        self.events.try_recv()
    }

    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<Event, mpsc::RecvTimeoutError> {
        self.events.recv_timeout(timeout)
    }

    /// stop the worker once it has drained its queue and wait for it
    pub fn shutdown(self) -> thread::Result<()> {
        let WorkerHandle {
            commands,
            events,
            thread,
        } = self;
        drop(commands);
        drop(events);
        thread.join()
    }
}

/// spawn the worker thread; it stays idle until [`Command::Start`]
pub fn spawn() -> WorkerHandle {
    let (commands, command_rx) = mpsc::channel();
    let (event_tx, events) = mpsc::channel();

    let thread = thread::spawn(move || {
        FrameLoop::new(event_tx).run(command_rx);
    });

    WorkerHandle {
        commands,
        events,
        thread,
    }
}

struct FrameLoop {
    sim: Option<Simulation>,
    steps_per_frame: usize,
    running: bool,
    /// the one buffer the worker may draw into, when the host is not holding it
    buffer: Option<Frame>,
    /// a frame has been handed to the host and not returned yet
    outstanding: bool,
    events: Sender<Event>,
}

impl FrameLoop {
    fn new(events: Sender<Event>) -> Self {
        Self {
            sim: None,
            steps_per_frame: SimConfig::default().steps_per_frame,
            running: false,
            buffer: None,
            outstanding: false,
            events,
        }
    }

    fn run(mut self, commands: Receiver<Command>) {
        while let Ok(command) = commands.recv() {
            let outcome = self.apply(command);
            if let Err(e) = outcome {
                warn!("command rejected: {}", e);
                if self.events.send(Event::Error(e)).is_err() {
                    break;
                }
            }
            if self.pump().is_err() {
                break;
            }
        }
        debug!("frame worker stopped");
    }

    fn apply(&mut self, command: Command) -> Result<(), LatticeError> {
        debug!("command {:?}", command);

        match command {
            Command::Start(config) => {
                if config.steps_per_frame == 0 {
                    return Err(LatticeError::InvalidParameter {
                        name: "steps per frame",
                        value: 0.0,
                    });
                }
                // a rejected start leaves any running simulation untouched
                let sim = Simulation::new(&config)?;

                self.steps_per_frame = config.steps_per_frame;
                if self.buffer.is_none() && !self.outstanding {
                    self.buffer = Some(Frame::new(config.width, config.height));
                }
                self.sim = Some(sim);
                self.running = true;
            }
            Command::Pause => self.running = false,
            Command::Resume => self.running = self.sim.is_some(),
            Command::Reset => self.sim_mut()?.reset(),
            Command::Params(update) => self.sim_mut()?.set_params(&update)?,
            Command::Barrier(preset) => self.sim_mut()?.set_preset(preset),
            Command::DrawBarrier { x, y, radius } => self.sim_mut()?.paint_disc(x, y, radius),
            Command::Perturb { amplitude } => self
                .sim_mut()?
                .perturb(amplitude, &mut rand::thread_rng())?,
            Command::Next(frame) => {
                self.buffer = Some(frame);
                self.outstanding = false;
            }
        }
        Ok(())
    }

    fn sim_mut(&mut self) -> Result<&mut Simulation, LatticeError> {
        self.sim.as_mut().ok_or(LatticeError::NotStarted)
    }

    /// run one batch and emit one frame when running and holding a buffer
    fn pump(&mut self) -> Result<(), SendError<Event>> {
        if !self.running {
            return Ok(());
        }
        let Some(sim) = self.sim.as_mut() else {
            return Ok(());
        };
        let Some(mut frame) = self.buffer.take() else {
            return Ok(());
        };

        sim.run(self.steps_per_frame);
        match sim.render(&mut frame) {
            Ok(()) => {
                self.outstanding = true;
                self.events.send(Event::Frame(frame))
            }
            Err(e) => {
                warn!("{}; pausing", e);
                self.running = false;
                self.buffer = Some(frame);
                self.events.send(Event::Error(e))
            }
        }
    }
}

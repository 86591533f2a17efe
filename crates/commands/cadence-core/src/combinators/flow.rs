//! Flow-control combinators: coroutines, deferred construction, random
//! choice and interruption.

use rand::{Rng, RngCore};

use crate::combinators::time::wait_for_frames;
use crate::command::{none, BoxedCommand, Command, CommandOperation, CommandState};

/// A value produced by a coroutine.
pub enum Yield {
    /// Run this command to completion before resuming the coroutine.
    Command(BoxedCommand),
    /// Pause for exactly one tick.
    NextFrame,
}

impl From<BoxedCommand> for Yield {
    fn from(command: BoxedCommand) -> Self {
        Yield::Command(command)
    }
}

impl Yield {
    fn into_command(self) -> BoxedCommand {
        match self {
            Yield::Command(command) => command,
            Yield::NextFrame => wait_for_frames(1).unwrap_or_else(|_| none()),
        }
    }
}

struct Coroutine<F, I> {
    factory: F,
    iterator: Option<I>,
    current: Option<BoxedCommand>,
}

impl<F, I> Command for Coroutine<F, I>
where
    F: FnMut() -> I,
    I: Iterator<Item = Yield>,
{
    fn advance(&mut self, mut delta_time: f64, operation: CommandOperation) -> CommandState {
        let iterator = self.iterator.get_or_insert_with(&mut self.factory);
        loop {
            let mut command = match self.current.take() {
                Some(command) => command,
                None => match iterator.next() {
                    Some(value) => value.into_command(),
                    None => {
                        self.iterator = None;
                        return CommandState::complete(delta_time);
                    }
                },
            };
            let result = command.advance(delta_time, operation);
            delta_time = result.delta_time;
            if !result.complete {
                self.current = Some(command);
                return CommandState::running(delta_time);
            }
        }
    }
}

/// Runs a coroutine: an iterator of [`Yield`]s produced by `factory`.
///
/// Each yielded command runs to completion, possibly over many ticks, before
/// the next value is pulled. When the iterator is exhausted the coroutine
/// completes, and the next call starts a fresh iterator from `factory`.
///
/// ```
/// use cadence_core::{coroutine, wait_for_time, CommandQueue, Yield};
///
/// let queue = CommandQueue::new();
/// queue.push(coroutine(|| {
///     let mut step = 0;
///     std::iter::from_fn(move || {
///         step += 1;
///         match step {
///             1 => wait_for_time(1.0).ok().map(Yield::Command),
///             2 => Some(Yield::NextFrame),
///             _ => None,
///         }
///     })
/// }));
/// queue.update(1.0, Default::default()).unwrap();
/// ```
pub fn coroutine<F, I>(factory: F) -> BoxedCommand
where
    F: FnMut() -> I + 'static,
    I: Iterator<Item = Yield> + 'static,
{
    Box::new(Coroutine {
        factory,
        iterator: None,
        current: None,
    })
}

struct Defer<F> {
    factory: F,
    command: Option<BoxedCommand>,
}

impl<F> Command for Defer<F>
where
    F: FnMut() -> BoxedCommand,
{
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        let command = self.command.get_or_insert_with(&mut self.factory);
        let result = command.advance(delta_time, operation);
        if result.complete {
            self.command = None;
        }
        result
    }
}

/// Builds the command just before it first runs, and again each time it
/// restarts (e.g. inside [`repeat`](crate::repeat)).
pub fn defer<F>(factory: F) -> BoxedCommand
where
    F: FnMut() -> BoxedCommand + 'static,
{
    Box::new(Defer {
        factory,
        command: None,
    })
}

struct ChooseRandom {
    commands: Vec<Option<BoxedCommand>>,
    chosen: Option<usize>,
    rng: Box<dyn RngCore>,
}

impl Command for ChooseRandom {
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        let len = self.commands.len();
        let rng = &mut self.rng;
        let index = *self.chosen.get_or_insert_with(|| rng.gen_range(0..len));
        let result = match &mut self.commands[index] {
            Some(command) => command.advance(delta_time, operation),
            None => CommandState::complete(delta_time),
        };
        if result.complete {
            self.chosen = None;
        }
        result
    }
}

/// Runs one of `commands`, chosen uniformly at random each time the
/// composite starts. `None` entries are allowed and take no time.
pub fn choose_random<I>(commands: I) -> BoxedCommand
where
    I: IntoIterator<Item = Option<BoxedCommand>>,
{
    choose_random_with(rand::thread_rng(), commands)
}

/// Like [`choose_random`], drawing from the given random number generator.
pub fn choose_random_with<R, I>(rng: R, commands: I) -> BoxedCommand
where
    R: RngCore + 'static,
    I: IntoIterator<Item = Option<BoxedCommand>>,
{
    let commands: Vec<Option<BoxedCommand>> = commands.into_iter().collect();
    if commands.is_empty() {
        return none();
    }
    Box::new(ChooseRandom {
        commands,
        chosen: None,
        rng: Box::new(rng),
    })
}

struct Interruptable<F> {
    command: BoxedCommand,
    on_interrupt: F,
    started: bool,
}

impl<F> Command for Interruptable<F>
where
    F: FnMut(),
{
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        if operation.is_fast_forward() {
            if self.started {
                (self.on_interrupt)();
                self.started = false;
            }
            return CommandState::complete(delta_time);
        }
        self.started = true;
        let result = self.command.advance(delta_time, operation);
        if result.complete {
            self.started = false;
        }
        result
    }
}

/// Calls `on_interrupt` when a started-but-unfinished `command` is
/// fast-forwarded, instead of forwarding the fast-forward to it.
///
/// Useful for commands waiting on something external, like an audio clip,
/// that need explicit cleanup when a queue is run to the end.
pub fn interruptable<F>(command: BoxedCommand, on_interrupt: F) -> BoxedCommand
where
    F: FnMut() + 'static,
{
    Box::new(Interruptable {
        command,
        on_interrupt,
        started: false,
    })
}

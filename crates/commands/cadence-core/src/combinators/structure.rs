//! Structural combinators: sequence, parallel and repetition.

use log::trace;

use crate::command::{none, BoxedCommand, Command, CommandOperation, CommandState};

struct Sequence {
    commands: Vec<BoxedCommand>,
    index: usize,
}

impl Command for Sequence {
    fn advance(&mut self, mut delta_time: f64, operation: CommandOperation) -> CommandState {
        loop {
            let result = self.commands[self.index].advance(delta_time, operation);
            if !result.complete {
                return CommandState::running(result.delta_time);
            }
            delta_time = result.delta_time;
            self.index += 1;
            if self.index == self.commands.len() {
                self.index = 0;
                return result;
            }
        }
    }
}

/// Runs commands one after another. Leftover time from a finished command
/// flows into the next one within the same call. Once the last command
/// completes the sequence starts over on its next call.
///
/// A single command is returned as-is.
pub fn sequence<I>(commands: I) -> BoxedCommand
where
    I: IntoIterator<Item = BoxedCommand>,
{
    let mut commands: Vec<BoxedCommand> = commands.into_iter().collect();
    match commands.len() {
        0 => none(),
        1 => commands.remove(0),
        _ => Box::new(Sequence { commands, index: 0 }),
    }
}

struct Parallel {
    commands: Vec<BoxedCommand>,
    finished: Vec<bool>,
}

impl Command for Parallel {
    fn advance(&mut self, delta_time: f64, operation: CommandOperation) -> CommandState {
        let mut complete = true;
        let mut smallest_delta_time = delta_time;
        for (command, finished) in self.commands.iter_mut().zip(self.finished.iter_mut()) {
            if *finished {
                continue;
            }
            let result = command.advance(delta_time, operation);
            *finished = result.complete;
            complete &= result.complete;
            smallest_delta_time = smallest_delta_time.min(result.delta_time);
        }
        if complete {
            self.finished.fill(false);
        }
        CommandState {
            delta_time: smallest_delta_time,
            complete,
        }
    }
}

/// Runs commands side by side with the same time step. Completes once every
/// child has completed; the time handed back is the smallest leftover among
/// the children.
///
/// A single command is returned as-is.
pub fn parallel<I>(commands: I) -> BoxedCommand
where
    I: IntoIterator<Item = BoxedCommand>,
{
    let mut commands: Vec<BoxedCommand> = commands.into_iter().collect();
    match commands.len() {
        0 => none(),
        1 => commands.remove(0),
        n => Box::new(Parallel {
            commands,
            finished: vec![false; n],
        }),
    }
}

struct Repeat {
    sequence: BoxedCommand,
    repeat_count: u32,
    count: u32,
}

impl Command for Repeat {
    fn advance(&mut self, mut delta_time: f64, operation: CommandOperation) -> CommandState {
        let mut complete = true;
        while complete && self.count < self.repeat_count {
            let result = self.sequence.advance(delta_time, operation);
            delta_time = result.delta_time;
            complete = result.complete;
            if complete {
                self.count += 1;
            }
        }
        self.count %= self.repeat_count;
        CommandState {
            delta_time,
            complete,
        }
    }
}

/// Repeats the sequence of `commands` `repeat_count` times, then starts over
/// on the next call.
pub fn repeat<I>(repeat_count: u32, commands: I) -> BoxedCommand
where
    I: IntoIterator<Item = BoxedCommand>,
{
    if repeat_count == 0 {
        return none();
    }
    let sequence = sequence(commands);
    if repeat_count == 1 {
        return sequence;
    }
    Box::new(Repeat {
        sequence,
        repeat_count,
        count: 0,
    })
}

struct RepeatForever {
    sequence: BoxedCommand,
}

impl Command for RepeatForever {
    fn advance(&mut self, mut delta_time: f64, operation: CommandOperation) -> CommandState {
        loop {
            let result = self.sequence.advance(delta_time, operation);
            delta_time = result.delta_time;
            if !result.complete {
                return CommandState::running(delta_time);
            }
            if operation.is_fast_forward() {
                trace!("repeat_forever stopped by fast forward");
                return CommandState::complete(delta_time);
            }
        }
    }
}

/// Repeats the sequence of `commands` until fast-forwarded.
///
/// The repeated commands must consume time under normal operation, otherwise
/// the loop never yields back to the caller.
pub fn repeat_forever<I>(commands: I) -> BoxedCommand
where
    I: IntoIterator<Item = BoxedCommand>,
{
    Box::new(RepeatForever {
        sequence: sequence(commands),
    })
}

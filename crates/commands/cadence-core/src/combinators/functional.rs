//! Helpers that map collections onto commands.

use crate::combinators::structure::{parallel, sequence};
use crate::command::BoxedCommand;

fn map_to_commands<T, I, F>(items: I, mut factory: F) -> Vec<BoxedCommand>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T, usize) -> Option<BoxedCommand>,
{
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| factory(item, index))
        .collect()
}

/// Builds a command per item and runs them in parallel. Items for which the
/// factory returns `None` are skipped.
pub fn map_parallel<T, I, F>(items: I, factory: F) -> BoxedCommand
where
    I: IntoIterator<Item = T>,
    F: FnMut(T, usize) -> Option<BoxedCommand>,
{
    parallel(map_to_commands(items, factory))
}

/// Builds a command per item and runs them one after another. Items for
/// which the factory returns `None` are skipped.
pub fn map_sequential<T, I, F>(items: I, factory: F) -> BoxedCommand
where
    I: IntoIterator<Item = T>,
    F: FnMut(T, usize) -> Option<BoxedCommand>,
{
    sequence(map_to_commands(items, factory))
}

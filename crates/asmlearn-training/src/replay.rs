// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scoped protection of a simulator's plastic state

use std::ops::{Deref, DerefMut};

use asmlearn_brain::Brain;
use tracing::error;

/// Snapshot of a brain taken on creation and restored on drop.
///
/// Restoration runs on every exit path, including `?` and panics. Call
/// [`PlasticStateGuard::commit`] to keep the changes instead.
pub struct PlasticStateGuard<'a, B: Brain> {
    brain: &'a mut B,
    snapshot: Option<B::Snapshot>,
}

impl<'a, B: Brain> PlasticStateGuard<'a, B> {
    pub fn new(brain: &'a mut B) -> Self {
        let snapshot = Some(brain.snapshot());
        Self { brain, snapshot }
    }

    /// Keep every change made through the guard
    pub fn commit(mut self) {
        self.snapshot = None;
    }
}

impl<B: Brain> Deref for PlasticStateGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.brain
    }
}

impl<B: Brain> DerefMut for PlasticStateGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.brain
    }
}

impl<B: Brain> Drop for PlasticStateGuard<'_, B> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            if let Err(err) = self.brain.restore(snapshot) {
                error!(target: "asmlearn-training", "Failed to restore brain state: {}", err);
            }
        }
    }
}

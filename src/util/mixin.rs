//! Composition by delegation
//!
//! `Mixin` pairs a base value with a donor. Field and method access goes to
//! the base through `Deref`; the donor's capabilities are forwarded through
//! trait implementations.

use crate::events::{EventEmitter, Listener, ListenerId, Logger};
use serde_json::Value;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Default)]
pub struct Mixin<B, D> {
    base: B,
    donor: D,
}

impl<B, D> Mixin<B, D> {
    pub fn new(base: B, donor: D) -> Self {
        Mixin { base, donor }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn donor(&self) -> &D {
        &self.donor
    }

    pub fn donor_mut(&mut self) -> &mut D {
        &mut self.donor
    }

    pub fn into_parts(self) -> (B, D) {
        (self.base, self.donor)
    }
}

impl<B, D> Deref for Mixin<B, D> {
    type Target = B;

    fn deref(&self) -> &B {
        &self.base
    }
}

impl<B, D> DerefMut for Mixin<B, D> {
    fn deref_mut(&mut self) -> &mut B {
        &mut self.base
    }
}

impl<B, D: Logger> Logger for Mixin<B, D> {
    fn log(&self, message: &str) {
        self.donor.log(message)
    }

    fn error(&self, message: &str) {
        self.donor.error(message)
    }

    fn info(&self, message: &str) {
        self.donor.info(message)
    }

    fn warn(&self, message: &str) {
        self.donor.warn(message)
    }
}

impl<B, D: EventEmitter> EventEmitter for Mixin<B, D> {
    fn on(&mut self, event: &str, listener: Listener) -> ListenerId {
        self.donor.on(event, listener)
    }

    fn once(&mut self, event: &str, listener: Listener) -> ListenerId {
        self.donor.once(event, listener)
    }

    fn off(&mut self, event: &str, id: ListenerId) -> bool {
        self.donor.off(event, id)
    }

    fn emit(&mut self, event: &str, args: &[Value]) -> bool {
        self.donor.emit(event, args)
    }

    fn remove_all_listeners(&mut self, event: Option<&str>) {
        self.donor.remove_all_listeners(event)
    }

    fn set_max_listeners(&mut self, max: usize) {
        self.donor.set_max_listeners(max)
    }

    fn max_listeners(&self) -> usize {
        self.donor.max_listeners()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Emitter, TracingLogger};
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter {
        hits: u32,
    }

    impl Counter {
        fn hit(&mut self) -> u32 {
            self.hits += 1;
            self.hits
        }
    }

    #[test]
    fn test_base_reachable_through_deref() {
        let mut mixed = Mixin::new(Counter { hits: 0 }, Emitter::new());
        assert_eq!(mixed.hit(), 1);
        assert_eq!(mixed.hits, 1);
        assert_eq!(mixed.base().hits, 1);
    }

    #[test]
    fn test_emitter_capability_forwarded() {
        let mut mixed = Mixin::new(Counter { hits: 0 }, Emitter::new());
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        mixed.on("hit", Box::new(move |_: &[Value]| seen.set(seen.get() + 1)));

        assert!(mixed.emit("hit", &[json!(1)]));
        assert_eq!(calls.get(), 1);
        assert_eq!(mixed.donor().listener_count("hit"), 1);
    }

    #[test]
    fn test_logger_capability_forwarded() {
        let mixed = Mixin::new(Counter { hits: 0 }, TracingLogger::new("counter"));
        mixed.info("forwarded");
        assert_eq!(mixed.donor().name(), "counter");
        let (_, logger) = mixed.into_parts();
        assert_eq!(logger.name(), "counter");
    }
}

//! Unit tests for phase workers, the emitter and the contract monitor.

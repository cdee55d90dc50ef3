//! Main-thread event pumping for daemon mode
//!
//! Global hotkeys on macOS are delivered through the main thread's run loop,
//! so the main thread has to keep servicing it while the daemon runs.

use std::time::Duration;

/// How long each pump iteration blocks
pub const PUMP_INTERVAL: Duration = Duration::from_millis(100);

/// Service the main thread until `done` returns true
pub fn pump_until(done: impl Fn() -> bool) {
    while !done() {
        pump(PUMP_INTERVAL);
    }
}

#[cfg(target_os = "macos")]
fn pump(interval: Duration) {
    use core_foundation::runloop::{kCFRunLoopDefaultMode, CFRunLoop};

    let mode = unsafe { kCFRunLoopDefaultMode };
    CFRunLoop::run_in_mode(mode, interval, false);
}

#[cfg(not(target_os = "macos"))]
fn pump(interval: Duration) {
    std::thread::sleep(interval);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn returns_once_done() {
        let calls = Cell::new(0);
        pump_until(|| {
            calls.set(calls.get() + 1);
            calls.get() > 2
        });
        assert_eq!(calls.get(), 3);
    }
}

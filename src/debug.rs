//! Feature-gated debug logging.
//!
//! `jx_log!` formats into a fixed buffer and pushes it onto a lock-free ring,
//! so it is safe to call from the audio thread. The ring is drained to a file
//! from non-realtime contexts (`drain_to_file`). With the `debug` feature
//! off, the macro compiles to nothing.

use std::fmt;

#[cfg(feature = "debug")]
pub mod logger {
    use std::cell::UnsafeCell;
    use std::fmt::{self, Write as _};
    use std::fs::OpenOptions;
    use std::io::Write as _;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::OnceLock;

    const RING_CAP: usize = 128;
    const MSG_MAX: usize = 256;

    const LOG_PATH: &str = "/tmp/jexciter.log";

    #[derive(Copy, Clone)]
    struct Entry {
        len: u16,
        bytes: [u8; MSG_MAX],
    }

    struct Ring {
        head: AtomicUsize,
        tail: AtomicUsize,
        slots: [UnsafeCell<Entry>; RING_CAP],
    }

    // Single-producer (audio thread) / single-consumer (drain) usage.
    unsafe impl Sync for Ring {}

    impl Ring {
        fn new() -> Self {
            Self {
                head: AtomicUsize::new(0),
                tail: AtomicUsize::new(0),
                slots: std::array::from_fn(|_| {
                    UnsafeCell::new(Entry {
                        len: 0,
                        bytes: [0; MSG_MAX],
                    })
                }),
            }
        }

        fn push(&self, entry: Entry) {
            let head = self.head.load(Ordering::Relaxed);
            let next = (head + 1) % RING_CAP;
            if next == self.tail.load(Ordering::Acquire) {
                // Full: drop the message rather than block the audio thread.
                return;
            }
            unsafe {
                *self.slots[head].get() = entry;
            }
            self.head.store(next, Ordering::Release);
        }

        fn pop(&self) -> Option<Entry> {
            let tail = self.tail.load(Ordering::Relaxed);
            if tail == self.head.load(Ordering::Acquire) {
                return None;
            }
            let entry = unsafe { *self.slots[tail].get() };
            self.tail.store((tail + 1) % RING_CAP, Ordering::Release);
            Some(entry)
        }
    }

    static RING: OnceLock<Ring> = OnceLock::new();
    static ENABLED: AtomicBool = AtomicBool::new(false);

    pub fn init() {
        let _ = RING.get_or_init(Ring::new);
        ENABLED.store(true, Ordering::Relaxed);
    }

    struct MsgBuf {
        entry: Entry,
    }

    impl fmt::Write for MsgBuf {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let len = self.entry.len as usize;
            let room = MSG_MAX - len;
            let take = s.len().min(room);
            self.entry.bytes[len..len + take].copy_from_slice(&s.as_bytes()[..take]);
            self.entry.len += take as u16;
            Ok(())
        }
    }

    pub fn log_args(args: fmt::Arguments) {
        if !ENABLED.load(Ordering::Relaxed) {
            return;
        }
        let Some(ring) = RING.get() else { return };
        let mut buf = MsgBuf {
            entry: Entry {
                len: 0,
                bytes: [0; MSG_MAX],
            },
        };
        let _ = buf.write_fmt(args);
        ring.push(buf.entry);
    }

    /// Flush pending messages to the log file. Never call on the audio thread.
    pub fn drain_to_file() {
        let Some(ring) = RING.get() else { return };
        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(LOG_PATH) else {
            return;
        };
        while let Some(entry) = ring.pop() {
            let len = entry.len as usize;
            if len == 0 {
                continue;
            }
            if let Ok(msg) = std::str::from_utf8(&entry.bytes[..len]) {
                let _ = writeln!(file, "{msg}");
            }
        }
    }
}

#[cfg(feature = "debug")]
pub(crate) fn jx_log_inner(args: fmt::Arguments) {
    logger::log_args(args);
}

#[cfg(not(feature = "debug"))]
pub(crate) fn jx_log_inner(_args: fmt::Arguments) {}

#[macro_export]
macro_rules! jx_log {
    ($($arg:tt)*) => {
        $crate::debug::jx_log_inner(format_args!($($arg)*))
    };
}

//! Timing of computations.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct Timed<V> {
    pub value: V,
    pub elapsed: Duration,
}
impl<V> Timed<V> {
    pub fn result<E>(f: impl FnOnce() -> Result<V, E>) -> Result<Timed<V>, E> {
        let start_time = Instant::now();
        f().map(|value| {
            let elapsed = start_time.elapsed();
            Timed { value, elapsed }
        })
    }

    pub fn measure(f: impl FnOnce() -> V) -> Timed<V> {
        let start_time = Instant::now();
        let value = f();
        Timed {
            value,
            elapsed: start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_keeps_value() {
        let timed = Timed::result(|| Ok::<_, ()>(42)).unwrap();
        assert_eq!(42, timed.value);
        assert_eq!(Err("failed"), Timed::<u32>::result(|| Err("failed")));
    }

    #[test]
    fn measure() {
        let timed = Timed::measure(|| "done");
        assert_eq!("done", timed.value);
        assert!(timed.elapsed < Duration::from_secs(60));
    }
}

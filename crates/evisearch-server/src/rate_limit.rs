//! Per-IP fixed-window rate limiting
//!
//! One window per client IP: 60 requests per 60 seconds by default. The
//! table is the only contended state in the process; a plain mutex is
//! enough since the critical section is a map probe. Stale entries are
//! swept lazily on the first check after a full window has elapsed.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    inner: Mutex<Inner>,
}

struct Inner {
    table: HashMap<IpAddr, Window>,
    last_sweep: Instant,
}

struct Window {
    start: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            inner: Mutex::new(Inner {
                table: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Admit or reject a request from `ip` now.
    pub fn check(&self, ip: IpAddr) -> Result<(), ()> {
        self.check_at(ip, Instant::now())
    }

    /// Clock-injected variant; `now` must be monotone per caller.
    pub fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), ()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if now.duration_since(inner.last_sweep) >= self.window {
            let window = self.window;
            inner.table.retain(|_, w| now.duration_since(w.start) < window);
            inner.last_sweep = now;
        }

        match inner.table.get_mut(&ip) {
            Some(w) if now.duration_since(w.start) < self.window => {
                if w.count >= self.max_requests {
                    return Err(());
                }
                w.count += 1;
                Ok(())
            }
            _ => {
                inner.table.insert(
                    ip,
                    Window {
                        start: now,
                        count: 1,
                    },
                );
                Ok(())
            }
        }
    }

    /// Tracked IP count, for tests and diagnostics.
    pub fn tracked(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .table
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(std::net::Ipv4Addr::new(1, 2, 3, last))
    }

    #[test]
    fn sixty_then_reject() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 60);
        let t0 = Instant::now();
        // 60 requests inside 30 seconds all pass
        for i in 0..60 {
            let t = t0 + Duration::from_millis(i * 500);
            assert!(limiter.check_at(ip(4), t).is_ok(), "request {} rejected", i + 1);
        }
        // request 61 inside the window is rejected
        assert!(limiter.check_at(ip(4), t0 + Duration::from_secs(30)).is_err());
    }

    #[test]
    fn window_resets_after_elapse() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 60);
        let t0 = Instant::now();
        for _ in 0..60 {
            assert!(limiter.check_at(ip(1), t0).is_ok());
        }
        assert!(limiter.check_at(ip(1), t0).is_err());
        // 60 s after the window start, a fresh window begins with count 1
        assert!(limiter.check_at(ip(1), t0 + Duration::from_secs(60)).is_ok());
        for _ in 0..59 {
            assert!(limiter
                .check_at(ip(1), t0 + Duration::from_secs(61))
                .is_ok());
        }
        assert!(limiter
            .check_at(ip(1), t0 + Duration::from_secs(61))
            .is_err());
    }

    #[test]
    fn ips_are_independent() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 2);
        let t0 = Instant::now();
        assert!(limiter.check_at(ip(1), t0).is_ok());
        assert!(limiter.check_at(ip(1), t0).is_ok());
        assert!(limiter.check_at(ip(1), t0).is_err());
        assert!(limiter.check_at(ip(2), t0).is_ok());
    }

    #[test]
    fn lazy_sweep_evicts_stale_entries() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 60);
        let t0 = Instant::now();
        limiter.check_at(ip(1), t0).unwrap();
        limiter.check_at(ip(2), t0).unwrap();
        assert_eq!(limiter.tracked(), 2);
        // the next check after the window elapses triggers the sweep
        limiter
            .check_at(ip(3), t0 + Duration::from_secs(120))
            .unwrap();
        assert_eq!(limiter.tracked(), 1);
    }
}

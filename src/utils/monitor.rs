use std::time::{Duration, Instant};

#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub memory_percent: f32,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
}

#[cfg(feature = "cli")]
struct ProcessSampler {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
    samples: usize,
}

#[cfg(feature = "cli")]
impl ProcessSampler {
    fn for_current_process() -> Option<Self> {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!("Process monitoring unavailable: {}", e);
                return None;
            }
        };

        Some(Self {
            system: System::new(),
            pid,
            peak_memory_mb: 0,
            samples: 0,
        })
    }

    fn sample(&mut self, started: Instant) -> Option<ProcessStats> {
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        self.system.refresh_memory();

        let process = self.system.process(self.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_mb = self.system.total_memory() / 1024 / 1024;
        let memory_percent = if total_mb > 0 {
            (memory_mb as f32 / total_mb as f32) * 100.0
        } else {
            0.0
        };

        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);
        self.samples += 1;

        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_mb,
            memory_percent,
            peak_memory_mb: self.peak_memory_mb,
            elapsed: started.elapsed(),
        })
    }
}

/// Samples CPU and memory of the current process between pipeline phases.
///
/// A disabled monitor holds no `System` and never touches the OS.
pub struct SystemMonitor {
    #[cfg(feature = "cli")]
    sampler: Option<Mutex<ProcessSampler>>,
    started: Instant,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        #[cfg(not(feature = "cli"))]
        let _ = enabled;

        Self {
            #[cfg(feature = "cli")]
            sampler: if enabled {
                ProcessSampler::for_current_process().map(Mutex::new)
            } else {
                None
            },
            started: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "cli")]
        {
            self.sampler.is_some()
        }
        #[cfg(not(feature = "cli"))]
        {
            false
        }
    }

    pub fn sample(&self) -> Option<ProcessStats> {
        #[cfg(feature = "cli")]
        {
            let mut sampler = self.sampler.as_ref()?.lock().ok()?;
            sampler.sample(self.started)
        }
        #[cfg(not(feature = "cli"))]
        {
            None
        }
    }

    /// Number of process samples taken so far.
    pub fn samples_taken(&self) -> usize {
        #[cfg(feature = "cli")]
        {
            self.sampler
                .as_ref()
                .and_then(|s| s.lock().ok().map(|s| s.samples))
                .unwrap_or(0)
        }
        #[cfg(not(feature = "cli"))]
        {
            0
        }
    }

    pub fn log_phase(&self, phase: &str) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_mb,
                stats.memory_percent,
                stats.peak_memory_mb,
                stats.elapsed
            );
        }
    }

    pub fn log_summary(&self) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed,
                stats.peak_memory_mb
            );
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_never_samples() {
        let monitor = SystemMonitor::new(false);

        monitor.log_phase("Extract");
        monitor.log_summary();

        assert!(!monitor.is_enabled());
        assert!(monitor.sample().is_none());
        assert_eq!(monitor.samples_taken(), 0);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_enabled_monitor_samples_current_process() {
        let monitor = SystemMonitor::new(true);
        assert!(monitor.is_enabled());

        let stats = monitor.sample().expect("current process is visible");
        monitor.log_phase("Load");

        assert!(stats.peak_memory_mb >= stats.memory_mb);
        assert_eq!(monitor.samples_taken(), 2);
    }
}

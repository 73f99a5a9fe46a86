//! Resource usage and host profile
//!
//! The benchmark brackets every strategy with a [`ResourceMonitor::query`] call. The
//! numbers are for reporting only and never feed back into counting.

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::LazyLock;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Host information, computed once on first access
pub static HOST: LazyLock<HostProfile> = LazyLock::new(HostProfile::detect);

/// Resource usage of one process at the moment of the query
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResourceUsage {
    pub peak_resident_bytes: u64,
    pub user_cpu_seconds: f64,
    pub kernel_cpu_seconds: f64,
}

impl ResourceUsage {
    pub fn peak_resident_kb(&self) -> u64 {
        self.peak_resident_bytes / 1024
    }

    /// CPU spent between `earlier` and `self`
    pub fn cpu_since(&self, earlier: &ResourceUsage) -> (f64, f64) {
        (
            (self.user_cpu_seconds - earlier.user_cpu_seconds).max(0.0),
            (self.kernel_cpu_seconds - earlier.kernel_cpu_seconds).max(0.0),
        )
    }
}

/// Source of resource usage figures for a process
pub trait ResourceMonitor {
    fn query(&mut self, pid: Pid) -> Result<ResourceUsage>;
}

/// Pid of the running benchmark
pub fn current_pid() -> Pid {
    Pid::from_u32(std::process::id())
}

/// Default monitor.
///
/// The current process is measured with `getrusage` on unix, which reports the true
/// peak resident set and splits user from kernel time. Other processes (and other
/// platforms) fall back to `sysinfo`, whose resident figure is sampled, so the peak is
/// the maximum seen across queries and all CPU time is counted as user time.
pub struct ProcessMonitor {
    system: System,
    sampled_peak: u64,
}

impl Default for ProcessMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessMonitor {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            sampled_peak: 0,
        }
    }

    fn query_sampled(&mut self, pid: Pid) -> Result<ResourceUsage> {
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let process = self
            .system
            .process(pid)
            .with_context(|| format!("process {pid} not found"))?;

        self.sampled_peak = self.sampled_peak.max(process.memory());
        Ok(ResourceUsage {
            peak_resident_bytes: self.sampled_peak,
            user_cpu_seconds: process.accumulated_cpu_time() as f64 / 1000.0,
            kernel_cpu_seconds: 0.0,
        })
    }
}

impl ResourceMonitor for ProcessMonitor {
    fn query(&mut self, pid: Pid) -> Result<ResourceUsage> {
        #[cfg(unix)]
        if pid == current_pid() {
            return rusage_self();
        }
        self.query_sampled(pid)
    }
}

#[cfg(unix)]
fn rusage_self() -> Result<ResourceUsage> {
    // SAFETY: rusage is plain old data and getrusage only writes into it.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return Err(std::io::Error::last_os_error()).context("getrusage failed");
    }

    // ru_maxrss is kilobytes on Linux and bytes on macOS
    let max_rss = usage.ru_maxrss.max(0) as u64;
    let peak_resident_bytes = if cfg!(target_os = "macos") {
        max_rss
    } else {
        max_rss * 1024
    };

    Ok(ResourceUsage {
        peak_resident_bytes,
        user_cpu_seconds: timeval_secs(usage.ru_utime),
        kernel_cpu_seconds: timeval_secs(usage.ru_stime),
    })
}

#[cfg(unix)]
fn timeval_secs(tv: libc::timeval) -> f64 {
    tv.tv_sec as f64 + tv.tv_usec as f64 / 1e6
}

/// Hardware the benchmark runs on
#[derive(Debug, Clone, Serialize)]
pub struct HostProfile {
    /// Total CPU cores (including hyperthreading)
    pub cpu_count: usize,
    /// Physical CPU cores
    pub physical_cpu_count: usize,
    /// Total system memory in bytes
    pub total_memory: u64,
    /// Available system memory in bytes at startup
    pub available_memory: u64,
    pub os_name: String,
}

impl HostProfile {
    fn detect() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();

        Self {
            cpu_count: num_cpus::get(),
            physical_cpu_count: num_cpus::get_physical(),
            total_memory: sys.total_memory(),
            available_memory: sys.available_memory(),
            os_name: System::name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} | CPUs: {} ({} physical) | Memory: {:.2} GB ({:.2} GB available)",
            self.os_name,
            self.cpu_count,
            self.physical_cpu_count,
            self.total_memory as f64 / (1024.0 * 1024.0 * 1024.0),
            self.available_memory as f64 / (1024.0 * 1024.0 * 1024.0),
        )
    }
}

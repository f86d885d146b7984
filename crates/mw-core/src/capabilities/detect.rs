//! Capability detection implementation.
//!
//! Probes are best-effort: a missing tool or unreadable file degrades to
//! `None`/`false` rather than an error.

use crate::exec;
use serde::Serialize;
use std::fs;
use tracing::debug;

/// Detected toolchain, kernel, and CPU capabilities.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Probe {
    /// binutils version, from `ld --version`.
    pub binutils: Option<String>,

    /// gcc version, from `gcc --version`.
    pub gcc: Option<String>,

    /// gdb version, from `gdb --version`.
    pub gdb: Option<String>,

    /// glibc version, from `ldd --version`.
    pub glibc: Option<String>,

    /// Kernel release, from `uname -r`.
    pub kernel: Option<String>,

    /// CPU family from `/proc/cpuinfo`.
    pub cpu_family: Option<u32>,

    /// CPU vendor id from `/proc/cpuinfo`.
    pub cpu_vendor: Option<String>,

    /// Whether the CPU advertises the `mpx` feature flag.
    pub cpu_mpx: bool,

    /// Whether the running kernel was built with `CONFIG_X86_INTEL_MPX=y`.
    pub kernel_mpx: bool,
}

impl Probe {
    /// binutils 2.24 or newer.
    pub fn has_binutils(&self) -> bool {
        at_least(self.binutils.as_deref(), 2, 24)
    }

    /// gcc 5 or newer.
    pub fn has_gcc(&self) -> bool {
        at_least(self.gcc.as_deref(), 5, 0)
    }

    /// gdb 7.10 or newer.
    pub fn has_gdb(&self) -> bool {
        at_least(self.gdb.as_deref(), 7, 10)
    }

    /// glibc 2.20 or newer.
    pub fn has_glibc(&self) -> bool {
        at_least(self.glibc.as_deref(), 2, 20)
    }

    /// Kernel 5+ unconditionally, or kernel 4 with MPX compiled in.
    pub fn has_kernel(&self) -> bool {
        match self.kernel.as_deref().and_then(leading_version) {
            Some((major, _)) => major > 4 || (major == 4 && self.kernel_mpx),
            None => false,
        }
    }

    /// CPU family 6 or newer.
    pub fn has_cpu_family(&self) -> bool {
        self.cpu_family.is_some_and(|family| family >= 6)
    }

    /// Intel CPU.
    pub fn has_cpu_vendor(&self) -> bool {
        self.cpu_vendor.as_deref() == Some("GenuineIntel")
    }

    /// Full MPX support: CPU feature flag and kernel config both present.
    pub fn has_mpx(&self) -> bool {
        self.cpu_mpx && self.kernel_mpx
    }
}

/// Probe the current host.
pub fn detect() -> Probe {
    let kernel = kernel_release();
    let kernel_mpx = kernel
        .as_deref()
        .map(kernel_config_has_mpx)
        .unwrap_or(false);
    let cpuinfo = fs::read_to_string("/proc/cpuinfo").ok();

    Probe {
        binutils: tool_version("ld", &["--version"], 6),
        gcc: tool_version("gcc", &["--version"], 3),
        gdb: tool_version("gdb", &["--version"], 4),
        glibc: tool_version("ldd", &["--version"], 4),
        kernel,
        cpu_family: cpuinfo
            .as_deref()
            .and_then(|info| cpuinfo_item(info, "cpu family"))
            .and_then(|family| family.parse().ok()),
        cpu_vendor: cpuinfo
            .as_deref()
            .and_then(|info| cpuinfo_item(info, "vendor_id")),
        cpu_mpx: cpuinfo
            .as_deref()
            .map(|info| info.contains(" mpx "))
            .unwrap_or(false),
        kernel_mpx,
    }
}

/// Version token of a tool's `--version` banner, at a fixed position.
fn tool_version(program: &str, args: &[&str], token: usize) -> Option<String> {
    let out = exec::run_capture(program, args)?;
    if !out.valid() {
        return None;
    }
    out.stdout.split_whitespace().nth(token).map(str::to_string)
}

fn kernel_release() -> Option<String> {
    let out = exec::run_capture("uname", &["-r"])?;
    if !out.valid() {
        return None;
    }
    Some(out.stdout.trim().to_string())
}

fn kernel_config_has_mpx(release: &str) -> bool {
    let path = format!("/boot/config-{release}");
    let Ok(config) = fs::read_to_string(&path) else {
        debug!(path = %path, "kernel config not readable");
        return false;
    };
    config.lines().any(|line| {
        line.split_once('=')
            .map(|(name, value)| {
                name.trim() == "CONFIG_X86_INTEL_MPX" && value.trim().eq_ignore_ascii_case("y")
            })
            .unwrap_or(false)
    })
}

/// Value of one `name : value` attribute in cpuinfo text.
fn cpuinfo_item(cpuinfo: &str, name: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with(name))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
}

/// Leading `major.minor` of a version string; trailing cruft is ignored.
fn leading_version(ver: &str) -> Option<(u32, u32)> {
    let mut parts = ver.split('.');
    let major = numeric_prefix(parts.next()?)?;
    let minor = parts.next().and_then(numeric_prefix).unwrap_or(0);
    Some((major, minor))
}

fn numeric_prefix(part: &str) -> Option<u32> {
    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn at_least(ver: Option<&str>, major: u32, minor: u32) -> bool {
    match ver.and_then(leading_version) {
        Some((maj, min)) => maj > major || (maj == major && min >= minor),
        None => false,
    }
}

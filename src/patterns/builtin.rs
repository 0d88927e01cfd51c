//! Default pattern dictionaries shipped with the tool.

use super::PatternLibrary;
use crate::classifier::matcher::PatternSet;

/// ALL-mode dictionary for `kubectl get pods` status lines.
const POD_STATUS: &[(&str, &[&str])] = &[
    ("Error", &["Error"]),
    ("Running No Pods", &["0/", "Running"]),
    ("Hanged in Init", &["Init:"]),
    ("Crashed", &["CrashLoopBackOff"]),
];

/// ANY-mode dictionary for `kubectl describe pods` output.
const DESCRIBE: &[(&str, &[&str])] = &[
    ("Warning", &["Warning"]),
    ("Reason", &["OOMKilled"]),
];

/// ANY-mode dictionary for per-pod log files.
const LOGS: &[(&str, &[&str])] = &[
    (
        "CAS Control Issues",
        &["no ready CAS servers", "cas-control is not ready"],
    ),
    (
        "Start Sequencer Warnings",
        &["SKIP_INIT_BLOCK", "bypassing sequencing", "exit code 0"],
    ),
    (
        "Readiness Check Failures",
        &[
            "check \"sas-endpoints-ready\" failed",
            "no available addresses",
            "endpoints have no available addresses",
            "0 available addresses",
            "failed readiness check",
        ],
    ),
    (
        "Telemetry Warnings",
        &[
            "OpenTelemetry support not installed",
            "noop Open Telemetry MeterProvider",
            "no metrics will be collected",
        ],
    ),
    (
        "Stalled Init Warnings",
        &["Waiting for", "POD(s) to Complete"],
    ),
    (
        "Authentication Failures",
        &[
            "Unauthorized",
            "authentication failed",
            "access denied",
            "invalid credentials",
            "token expired",
        ],
    ),
    (
        "Tool Execution Failures",
        &[
            "sonder-log-icu.tool.error.executing.command.log",
            "sonder-log-icu.tool.executor.failed.running.tools.log",
            "Service executor failed to execute successfully: exit status 1",
        ],
    ),
    (
        "Certificate Write Failures",
        &["writeAsPem failed", "error writing PEM file"],
    ),
    (
        "Certificate Errors",
        &[
            "error generating certificates",
            "failed to create cert secret",
            "failed to write certificate file",
            "invalid certificate configuration",
        ],
    ),
    (
        "PVC Errors",
        &[
            "PersistentVolumeClaim is not bound",
            "PersistentVolumeClaim is not available",
            "PersistentVolumeClaim is in pending state",
            "PVC pending",
            "PVC",
        ],
    ),
    (
        "FailedMount Errors",
        &[
            "MountVolume.SetUp failed for volume",
            "references non-existent secret key",
        ],
    ),
    (
        "Compute Context Errors",
        &[
            "Compute context to be used by the CAS Formats service",
            "no ready CAS servers, so cas-control is not ready",
        ],
    ),
    ("PyConfig errors", &["Error creating md5sum file"]),
    (
        "SAS Data Quality Services Errors",
        &["sonder-log-icu.tool.executor.failed.starting.service.log"],
    ),
    (
        "SAS ESP CSS Errors",
        &["could not find a valid ESP SERVER license"],
    ),
    ("Consul issues", &["No cluster leader"]),
];

fn set(groups: &[(&str, &[&str])]) -> PatternSet {
    let mut out = PatternSet::new();
    for (category, patterns) in groups {
        out.insert(*category, patterns.iter().map(|p| p.to_string()).collect());
    }
    out
}

pub(super) fn library() -> PatternLibrary {
    PatternLibrary {
        pod_status: set(POD_STATUS),
        describe: set(DESCRIBE),
        logs: set(LOGS),
    }
}

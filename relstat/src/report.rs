use std::fmt::Write as _;

use chrono::Utc;
use kube::ResourceExt;
use kube::core::DynamicObject;
use tracing::debug;

use crate::errors::StatusError;
use crate::graph::DependencyGraph;
use crate::group::ObjectGroups;
use crate::observe::MissingResource;

/// Renders one live object as a human-readable row. Pluggable so callers can
/// swap in richer per-kind printers.
pub trait RowPrinter {
    fn print_row(
        &self,
        obj: &DynamicObject,
        out: &mut String,
    ) -> std::fmt::Result;
}

/// Default printer: name, namespace, age. Works for any object since it only
/// touches common metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainRowPrinter;

impl RowPrinter for PlainRowPrinter {
    fn print_row(
        &self,
        obj: &DynamicObject,
        out: &mut String,
    ) -> std::fmt::Result {
        let age = match obj.metadata.creation_timestamp.as_ref() {
            Some(t) => humanize_secs((Utc::now() - t.0).num_seconds()),
            None => "<none>".to_string(),
        };
        writeln!(
            out,
            "{}\t\t{}\t\t{}",
            obj.name_any(),
            obj.namespace().unwrap_or_default(),
            age
        )
    }
}

fn humanize_secs(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

/// Render the grouped live objects as sectioned text: a `==> type` header
/// per group, one row per object, a blank separator line after each group.
/// With nothing fetched at all the report is still a single blank line, so
/// an empty-but-successful run can't be mistaken for a failed one.
pub fn write_groups(
    buf: &mut String,
    groups: &ObjectGroups,
    printer: &impl RowPrinter,
) -> Result<(), StatusError> {
    for (type_key, objects) in groups.iter() {
        writeln!(buf, "==> {}", type_key)?;
        for obj in objects {
            printer.print_row(obj, buf)?;
        }
        buf.push('\n');
    }
    if groups.is_empty() {
        buf.push('\n');
    }
    Ok(())
}

/// Render the diagnostic section for resources that were declared but not
/// observable. Rows come out in fetch-failure order. A missing resource with
/// no node in the graph gets no row.
pub fn write_missing_section(
    buf: &mut String,
    missing: &[MissingResource],
    graph: &impl DependencyGraph,
) -> Result<(), StatusError> {
    buf.write_str("==> MISSING\nKIND\t\tNAME\t\tSTATUS\t\n")?;
    for m in missing {
        let key = m.key();
        let Some(report) = graph.node_report(&key) else {
            debug!(%key, "missing resource has no graph node; skipping");
            continue;
        };
        write!(buf, "{}\t\t{}\t\t", m.resource, m.name)?;
        if report.blocked {
            buf.write_str("WAITING_FOR:")?;
            for dep in &report.dependencies {
                if !dep.blocks {
                    continue;
                }
                write!(buf, " {},", dep.dependency)?;
            }
        } else {
            buf.write_str("INPROGRESS")?;
        }
        buf.write_str("\t\n")?;
    }
    Ok(())
}

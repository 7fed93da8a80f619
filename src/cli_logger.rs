use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use sortreel::{PlaybackState, PlaybackSummary, ScriptReport};

pub struct CliLogger {
    json: bool,
    no_color: bool,
}

impl CliLogger {
    pub fn new(json: bool, no_color: bool) -> Self {
        Self { json, no_color }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn print_serialized<T: Serialize>(&self, value: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(value)?);
            return Ok(());
        }

        let rendered = render_value(&serde_json::to_value(value)?, 0);
        println!("{rendered}");
        Ok(())
    }

    pub fn print_summary(&self, summary: &PlaybackSummary) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(summary)?);
            return Ok(());
        }
        println!("{}", self.summary_text(summary).trim_end());
        Ok(())
    }

    pub fn print_script_report(&self, report: &ScriptReport) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(report)?);
            return Ok(());
        }

        let mut out = String::new();
        out.push_str(&format!(
            "{} {} steps={} rejected={}\n",
            self.style("script", "36;1"),
            self.style(&report.name, "37;1"),
            report.steps_run,
            report.rejected
        ));
        out.push_str(&self.summary_text(&report.summary));
        println!("{}", out.trim_end());
        Ok(())
    }

    pub fn print_error(&self, msg: &str) {
        if self.json {
            let out = serde_json::json!({
                "status": "error",
                "code": "error",
                "message": msg,
            });
            println!("{out}");
            return;
        }
        eprintln!("{} {msg}", self.style("error", "31;1"));
    }

    pub fn print_warning(&self, msg: &str) {
        if self.json {
            let out = serde_json::json!({
                "status": "warning",
                "code": "warning",
                "message": msg,
            });
            eprintln!("{out}");
            return;
        }
        eprintln!("{} {msg}", self.style("warn", "33;1"));
    }

    fn summary_text(&self, summary: &PlaybackSummary) -> String {
        let state = match summary.state {
            PlaybackState::Done => self.style("DONE", "32;1"),
            PlaybackState::Running => self.style("RUNNING", "36;1"),
            PlaybackState::Paused => self.style("PAUSED", "33;1"),
            PlaybackState::Idle => self.style("IDLE", "37;1"),
        };

        let mut out = String::new();
        out.push_str(&format!(
            "{} {} {}\n",
            self.style("sortreel", "36;1"),
            self.style(summary.algorithm.as_str(), "37;1"),
            state
        ));
        out.push_str(&format!("{} {}\n", self.style("size", "90"), summary.size));
        out.push_str(&format!(
            "{} {}/{}\n",
            self.style("events", "90"),
            summary.cursor,
            summary.total
        ));
        out.push_str(&format!(
            "{} comparisons={} writes={}\n",
            self.style("counters", "90"),
            summary.comparisons,
            summary.writes
        ));
        out.push_str(&format!(
            "{} {}/{}\n",
            self.style("sorted", "90"),
            summary.sorted,
            summary.size
        ));
        out.push_str(&format!("{} {}\n", self.style("speed", "90"), summary.speed));
        out
    }

    fn style(&self, text: &str, ansi: &str) -> String {
        if self.no_color {
            return text.to_string();
        }
        format!("\x1b[{ansi}m{text}\x1b[0m")
    }
}

fn render_value(value: &Value, indent: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => render_array(items, indent),
        Value::Object(map) => render_object(map, indent),
    }
}

fn render_array(items: &[Value], indent: usize) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }

    let pad = " ".repeat(indent);
    let mut out = String::new();
    for item in items {
        match item {
            Value::Object(map) if is_flat(map) => {
                out.push_str(&format!("{pad}- {}\n", render_inline(map)));
            }
            Value::Object(_) | Value::Array(_) => {
                out.push_str(&format!("{pad}-\n{}\n", render_value(item, indent + 2)));
            }
            _ => out.push_str(&format!("{pad}- {}\n", render_value(item, indent + 2))),
        }
    }
    out.trim_end().to_string()
}

fn render_object(map: &serde_json::Map<String, Value>, indent: usize) -> String {
    if map.is_empty() {
        return "{}".to_string();
    }

    let pad = " ".repeat(indent);
    let mut out = String::new();
    for (key, value) in map {
        match value {
            Value::Object(_) | Value::Array(_) => {
                out.push_str(&format!(
                    "{pad}{key}:\n{}\n",
                    render_value(value, indent + 2)
                ));
            }
            _ => out.push_str(&format!(
                "{pad}{key}: {}\n",
                render_value(value, indent + 2)
            )),
        }
    }
    out.trim_end().to_string()
}

/// Events are small flat objects; one line each keeps long logs readable.
fn is_flat(map: &serde_json::Map<String, Value>) -> bool {
    map.values().all(|v| !matches!(v, Value::Object(_) | Value::Array(_)))
}

fn render_inline(map: &serde_json::Map<String, Value>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}={}", render_value(v, 0)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_objects_render_inline() {
        let value = serde_json::json!([{"kind": "compare", "i": 0, "j": 1}, {"kind": "done"}]);
        let text = render_value(&value, 0);
        assert_eq!(text, "- i=0 j=1 kind=compare\n- kind=done");
    }

    #[test]
    fn nested_objects_indent() {
        let value = serde_json::json!({"summary": {"events": 3}});
        assert_eq!(render_value(&value, 0), "summary:\n  events: 3");
    }
}

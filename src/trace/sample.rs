//! Bundled demo trace
//!
//! A hand-built trace of the classic event-loop teaching example: a zero
//! delay `setTimeout` callback still runs after the rest of the script,
//! because the call stack must empty before the event loop picks up the
//! queued callback. Played by `tracetty --demo`.

use super::value::Value;
use super::ExecutionSnapshot;
use rustc_hash::FxHashMap;

const DEMO_SOURCE: &str = r#"const delay = 0;
console.log("start");

setTimeout(function onTimeout() {
  console.log("timeout fired");
}, delay);

console.log("end");
"#;

fn snapshot(
    line: usize,
    call_stack: &[&str],
    variables: &[(&str, Value)],
    output: &[&str],
) -> ExecutionSnapshot {
    let mut vars = FxHashMap::default();
    for (name, value) in variables {
        vars.insert(name.to_string(), value.clone());
    }
    ExecutionSnapshot {
        call_stack: call_stack.iter().map(|s| s.to_string()).collect(),
        variables: vars,
        output: output.iter().map(|s| s.to_string()).collect(),
        line: Some(line),
    }
}

/// The event-loop demo: source text plus its execution trace
pub fn event_loop_demo() -> (String, Vec<ExecutionSnapshot>) {
    let delay = ("delay", Value::Number(0.0));

    let snapshots = vec![
        snapshot(1, &["main()"], &[], &[]),
        snapshot(2, &["main()"], &[delay.clone()], &[]),
        snapshot(
            2,
            &["main()", "console.log()"],
            &[delay.clone()],
            &["start"],
        ),
        snapshot(
            4,
            &["main()", "setTimeout()"],
            &[delay.clone()],
            &["start"],
        ),
        snapshot(8, &["main()"], &[delay.clone()], &["start"]),
        snapshot(
            8,
            &["main()", "console.log()"],
            &[delay.clone()],
            &["start", "end"],
        ),
        // script done, stack drained; the event loop dequeues the callback
        snapshot(5, &["onTimeout()"], &[], &["start", "end"]),
        snapshot(
            5,
            &["onTimeout()", "console.log()"],
            &[],
            &["start", "end", "timeout fired"],
        ),
        snapshot(6, &[], &[], &["start", "end", "timeout fired"]),
    ];

    (DEMO_SOURCE.to_string(), snapshots)
}

#[cfg(test)]
mod tests {
    use super::super::TraceStore;
    use super::*;

    #[test]
    fn demo_trace_is_a_valid_trace() {
        let (source, snapshots) = event_loop_demo();
        assert!(!source.is_empty());

        let mut store = TraceStore::new();
        store.load(snapshots).expect("demo trace failed validation");
        assert!(store.len() > 1);
    }

    #[test]
    fn demo_lines_point_into_the_demo_source() {
        let (source, snapshots) = event_loop_demo();
        let line_count = source.lines().count();
        for snap in &snapshots {
            let line = snap.line.expect("demo snapshots carry lines");
            assert!(line >= 1 && line <= line_count, "line {} out of source", line);
        }
    }
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use mstree_core::{PlanConfig, plan};
use mstree_parser::parse;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let Ok(problem) = parse(s) else {
            return;
        };
        if let Ok(plan) = plan(problem.vertex_count, &problem.candidates, &PlanConfig::default()) {
            for q in &problem.queries {
                let _ = plan.replacement(q.v1, q.v2, q.weight);
            }
        }
    }
});

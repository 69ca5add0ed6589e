//! A minimal DPLL engine with unit propagation.
//!
//! This is the reference implementation of [`SatEngineIF`]: correct,
//! deterministic, and honest about budgets, but with none of the
//! machinery of a production CDCL engine. It exists so the encoder is
//! usable and testable end-to-end without an external dependency.
use {
    super::{Certificate, SatEngineIF, SolveLimits},
    crate::types::{Literal, VarId},
    std::time::Instant,
};

#[derive(Debug, Default)]
pub struct SimpleEngine {
    num_vars: usize,
    clauses: Vec<Vec<Literal>>,
}

impl SatEngineIF for SimpleEngine {
    fn add_var(&mut self) -> usize {
        self.num_vars += 1;
        self.num_vars
    }
    fn add_clause(&mut self, clause: &[Literal]) {
        self.clauses.push(clause.to_vec());
    }
    fn solve(&mut self, assumptions: &[Literal], limits: &SolveLimits) -> Certificate {
        let start = Instant::now();
        let mut asg: Vec<Option<bool>> = vec![None; self.num_vars + 1];
        let mut trail: Vec<VarId> = Vec::new();
        for l in assumptions.iter() {
            let vi = l.var_id();
            match asg[vi] {
                Some(v) if v != l.is_positive() => return Certificate::Unsat,
                Some(_) => (),
                None => {
                    asg[vi] = Some(l.is_positive());
                    trail.push(vi);
                }
            }
        }
        if !propagate(&self.clauses, &mut asg, &mut trail) {
            return Certificate::Unsat;
        }
        // (trail length at decision time, decided var, already flipped)
        let mut decisions: Vec<(usize, VarId, bool)> = Vec::new();
        let mut conflicts: u64 = 0;
        loop {
            if let Some(t) = limits.time {
                if t < start.elapsed() {
                    return Certificate::Unknown;
                }
            }
            let Some(vi) = (1..=self.num_vars).find(|&v| asg[v].is_none()) else {
                let assignment = asg.iter().map(|a| a.unwrap_or(false)).collect();
                return Certificate::Sat(assignment);
            };
            decisions.push((trail.len(), vi, false));
            asg[vi] = Some(true);
            trail.push(vi);
            while !propagate(&self.clauses, &mut asg, &mut trail) {
                conflicts += 1;
                if let Some(limit) = limits.conflicts {
                    if limit < conflicts {
                        return Certificate::Unknown;
                    }
                }
                loop {
                    let Some((mark, dv, flipped)) = decisions.pop() else {
                        return Certificate::Unsat;
                    };
                    while mark < trail.len() {
                        if let Some(v) = trail.pop() {
                            asg[v] = None;
                        }
                    }
                    if flipped {
                        continue;
                    }
                    decisions.push((mark, dv, true));
                    asg[dv] = Some(false);
                    trail.push(dv);
                    break;
                }
            }
        }
    }
}

/// run unit propagation to fixpoint; false means an empty clause arose.
fn propagate(clauses: &[Vec<Literal>], asg: &mut [Option<bool>], trail: &mut Vec<VarId>) -> bool {
    let mut changed = true;
    while changed {
        changed = false;
        for clause in clauses.iter() {
            let mut unit: Option<Literal> = None;
            let mut open = 0;
            let mut satisfied = false;
            for l in clause.iter() {
                match asg[l.var_id()] {
                    Some(v) if v == l.is_positive() => {
                        satisfied = true;
                        break;
                    }
                    Some(_) => (),
                    None => {
                        open += 1;
                        unit = Some(*l);
                    }
                }
            }
            if satisfied {
                continue;
            }
            match (open, unit) {
                (0, _) => return false,
                (1, Some(l)) => {
                    asg[l.var_id()] = Some(l.is_positive());
                    trail.push(l.var_id());
                    changed = true;
                }
                _ => (),
            }
        }
    }
    true
}

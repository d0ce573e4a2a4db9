use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Fst, StateId, Transition, TropicalWeight};

/// Extract the single lowest-cost accepting path as a linear machine.
///
/// Dijkstra's algorithm over non-negative tropical weights. Ties are broken
/// deterministically: the queue pops equal distances by lowest state id, a
/// predecessor is only replaced by a strictly cheaper one (so the earliest
/// transition wins), and among equally cheap final states the lowest id is
/// chosen. Returns an empty machine when nothing is accepted.
pub fn shortest_path(fst: &Fst) -> Fst {
    let Some(start) = fst.start() else {
        return Fst::new();
    };

    let n = fst.num_states();
    let mut distance = vec![TropicalWeight::zero(); n];
    let mut parent: Vec<Option<(StateId, usize)>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    distance[start] = TropicalWeight::one();
    heap.push(Reverse((TropicalWeight::one(), start)));

    while let Some(Reverse((dist, state))) = heap.pop() {
        if settled[state] {
            continue;
        }
        settled[state] = true;

        for (index, t) in fst.transitions(state).iter().enumerate() {
            let candidate = dist.times(t.weight);
            if candidate < distance[t.nextstate] {
                distance[t.nextstate] = candidate;
                parent[t.nextstate] = Some((state, index));
                heap.push(Reverse((candidate, t.nextstate)));
            }
        }
    }

    let mut best: Option<(TropicalWeight, StateId)> = None;
    for state in 0..n {
        let Some(final_weight) = fst.final_weight(state) else {
            continue;
        };
        if distance[state].is_zero() {
            continue;
        }
        let total = distance[state].times(final_weight);
        if best.map_or(true, |(weight, _)| total < weight) {
            best = Some((total, state));
        }
    }

    let Some((_, last)) = best else {
        return Fst::new();
    };

    let mut path: Vec<Transition> = Vec::new();
    let mut state = last;
    while let Some((prev, index)) = parent[state] {
        path.push(fst.transitions(prev)[index]);
        state = prev;
    }
    path.reverse();

    let mut result = Fst::new();
    let mut current = result.add_state();
    result.set_start(current);
    for t in path {
        let next = result.add_state();
        result.add_transition(current, Transition { nextstate: next, ..t });
        current = next;
    }
    if let Some(final_weight) = fst.final_weight(last) {
        result.set_final(current, final_weight);
    }

    result
}

/// Total cost of a single-path machine, or `None` when it accepts nothing.
pub fn path_weight(path: &Fst) -> Option<TropicalWeight> {
    let mut state = path.start()?;
    let mut total = TropicalWeight::one();
    for _ in 0..path.num_states() {
        match path.transitions(state).first() {
            Some(t) => {
                total = total.times(t.weight);
                state = t.nextstate;
            }
            None => break,
        }
    }
    path.final_weight(state).map(|w| total.times(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_cheapest_alternative() {
        let fst = Fst::cross("5", "expensive", TropicalWeight(2.0))
            .union(&Fst::cross("5", "cheap", TropicalWeight(0.5)));
        let path = shortest_path(&fst);
        assert_eq!(path.output_string(), Some("cheap".to_string()));
        assert_eq!(path_weight(&path), Some(TropicalWeight(0.5)));
    }

    #[test]
    fn test_tie_prefers_first_transition() {
        let fst = Fst::string_map([("5", "first"), ("5", "second")]);
        for _ in 0..10 {
            assert_eq!(
                shortest_path(&fst).output_string(),
                Some("first".to_string())
            );
        }
    }

    #[test]
    fn test_final_weight_counts() {
        let mut cheap_arc = Fst::cross("5", "a", TropicalWeight(0.0));
        let last = cheap_arc.num_states() - 1;
        cheap_arc.set_final(last, TropicalWeight(3.0));
        let fst = cheap_arc.union(&Fst::cross("5", "b", TropicalWeight(1.0)));
        assert_eq!(shortest_path(&fst).output_string(), Some("b".to_string()));
    }

    #[test]
    fn test_no_final_state_gives_empty() {
        let mut fst = Fst::new();
        let s = fst.add_state();
        fst.set_start(s);
        let path = shortest_path(&fst);
        assert_eq!(path.num_states(), 0);
        assert_eq!(path.output_string(), None);
        assert_eq!(path_weight(&path), None);
    }

    #[test]
    fn test_empty_machine_gives_empty() {
        assert!(shortest_path(&Fst::new()).is_empty());
    }

    #[test]
    fn test_handles_cycles() {
        let loop_fst = Fst::cross("0", "", TropicalWeight(0.0)).closure();
        let fst = loop_fst.concat(&Fst::cross("1", "one", TropicalWeight(0.0)));
        assert_eq!(shortest_path(&fst).output_string(), Some("one".to_string()));
    }
}

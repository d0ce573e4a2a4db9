use std::collections::{HashMap, VecDeque};

use super::{Fst, FstError, Label, StateId, Transition, TropicalWeight, EPSILON};

/// Compose `left` with `right`: the result maps an input of `left` to an
/// output of `right` whenever `left`'s output matches `right`'s input.
///
/// Only state pairs reachable from the start pair are built, in breadth-first
/// order, and the result is trimmed with [`Fst::connect`]. An empty result
/// means no path of `left` survives. `max_states` bounds the number of pairs
/// that may be created before the construction gives up.
///
/// No epsilon filter is applied: when both sides move on epsilon the same
/// path may appear twice, which changes path multiplicity but never the
/// shortest distance.
pub fn compose(left: &Fst, right: &Fst, max_states: usize) -> Result<Fst, FstError> {
    let mut result = Fst::new();
    let (Some(left_start), Some(right_start)) = (left.start(), right.start()) else {
        return Ok(result);
    };

    let mut index: HashMap<(StateId, StateId), StateId> = HashMap::new();
    let mut queue = VecDeque::new();

    let start = result.add_state();
    result.set_start(start);
    index.insert((left_start, right_start), start);
    queue.push_back((left_start, right_start, start));

    while let Some((l, r, current)) = queue.pop_front() {
        if let (Some(lw), Some(rw)) = (left.final_weight(l), right.final_weight(r)) {
            result.set_final(current, lw.times(rw));
        }

        let mut moves: Vec<(Label, Label, TropicalWeight, (StateId, StateId))> = Vec::new();

        for lt in left.transitions(l) {
            if lt.olabel == EPSILON {
                moves.push((lt.ilabel, EPSILON, lt.weight, (lt.nextstate, r)));
                continue;
            }
            for rt in right.transitions(r) {
                if rt.ilabel == lt.olabel {
                    moves.push((
                        lt.ilabel,
                        rt.olabel,
                        lt.weight.times(rt.weight),
                        (lt.nextstate, rt.nextstate),
                    ));
                }
            }
        }

        for rt in right.transitions(r) {
            if rt.ilabel == EPSILON {
                moves.push((EPSILON, rt.olabel, rt.weight, (l, rt.nextstate)));
            }
        }

        for (ilabel, olabel, weight, pair) in moves {
            let next = match index.get(&pair) {
                Some(&state) => state,
                None => {
                    if result.num_states() >= max_states {
                        return Err(FstError::StateLimitExceeded { limit: max_states });
                    }
                    let state = result.add_state();
                    index.insert(pair, state);
                    queue.push_back((pair.0, pair.1, state));
                    state
                }
            };
            result.add_transition(current, Transition::new(ilabel, olabel, weight, next));
        }
    }

    Ok(result.connect())
}

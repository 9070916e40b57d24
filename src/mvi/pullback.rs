//! Vertical composition: lift a reducer over a narrow (state, action) pair
//! into one over a wider pair.

use std::fmt;

use super::optics::{Lens, Prism};
use super::reducer::Reducer;

/// Reducer over `(GS, GA)` that delegates to `R` for actions matched by the
/// prism, touching only the part of the state reachable through the lens.
pub struct Pullback<R: Reducer, GS, GA> {
    reducer: R,
    lens: Lens<GS, R::State>,
    prism: Prism<GA, R::Action>,
}

impl<R: Reducer, GS, GA> Pullback<R, GS, GA> {
    pub fn new(reducer: R, lens: Lens<GS, R::State>, prism: Prism<GA, R::Action>) -> Self {
        Self {
            reducer,
            lens,
            prism,
        }
    }
}

impl<R: Reducer, GS, GA> Reducer for Pullback<R, GS, GA> {
    type State = GS;
    type Action = GA;

    fn reduce(&self, mut state: GS, action: &GA) -> GS {
        let Some(local_action) = self.prism.extract(action) else {
            return state;
        };
        let local = self.lens.get(&state);
        let local = self.reducer.reduce(local, local_action);
        self.lens.set(&mut state, local);
        state
    }
}

impl<R: Reducer + fmt::Debug, GS, GA> fmt::Debug for Pullback<R, GS, GA> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pullback")
            .field("reducer", &self.reducer)
            .field("lens", &self.lens)
            .field("prism", &self.prism)
            .finish()
    }
}

/// Lift `reducer` into the `(GS, GA)` domain.
///
/// Global actions the prism does not match leave the state untouched; matched
/// actions can only change the part of the state the lens focuses on.
pub fn pullback<R, GS, GA>(
    reducer: R,
    lens: Lens<GS, R::State>,
    prism: Prism<GA, R::Action>,
) -> Pullback<R, GS, GA>
where
    R: Reducer,
{
    Pullback::new(reducer, lens, prism)
}

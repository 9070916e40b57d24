//! Optics: how a reducer written for a small state / action reaches into a
//! larger one.
//!
//! - [`Lens`] focuses a part of a state value (`get` / `set`).
//! - [`Prism`] focuses one case of an action enum (`embed` / `extract`).
//!
//! Prefer the [`lens!`](crate::lens) and [`prism!`](crate::prism) macros over
//! hand-written closures: they derive both directions from the same field path
//! or enum variant, so the optic laws hold by construction.

use std::fmt;
use std::sync::Arc;

type GetFn<G, L> = Arc<dyn Fn(&G) -> L + Send + Sync>;
type SetFn<G, L> = Arc<dyn Fn(&mut G, L) + Send + Sync>;
type EmbedFn<G, L> = Arc<dyn Fn(L) -> G + Send + Sync>;
type ExtractFn<G, L> = Arc<dyn for<'a> Fn(&'a G) -> Option<&'a L> + Send + Sync>;

/// Read/write focus on a `Local` part of a `Global` state.
///
/// Laws: `get(set(g, l)) == l` and `set(g, get(g)) == g`.
pub struct Lens<G, L> {
    get: GetFn<G, L>,
    set: SetFn<G, L>,
}

impl<G, L> Lens<G, L> {
    pub fn new<Get, Set>(get: Get, set: Set) -> Self
    where
        Get: Fn(&G) -> L + Send + Sync + 'static,
        Set: Fn(&mut G, L) + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
        }
    }

    pub fn get(&self, global: &G) -> L {
        (self.get)(global)
    }

    pub fn set(&self, global: &mut G, local: L) {
        (self.set)(global, local)
    }

    /// Replace the focused part with `f(get(global))`.
    pub fn over(&self, global: &mut G, f: impl FnOnce(L) -> L) {
        let local = self.get(global);
        self.set(global, f(local));
    }

    /// Focus further into the part this lens already focuses.
    pub fn then<M>(self, inner: Lens<L, M>) -> Lens<G, M>
    where
        G: 'static,
        L: 'static,
        M: 'static,
    {
        let outer_get = Arc::clone(&self.get);
        let inner_get = Arc::clone(&inner.get);
        Lens::new(
            move |global: &G| inner_get(&outer_get(global)),
            move |global: &mut G, value: M| {
                let mut local = self.get(global);
                inner.set(&mut local, value);
                self.set(global, local);
            },
        )
    }
}

impl<G: Clone + 'static> Lens<G, G> {
    /// Lens focusing the whole value.
    pub fn identity() -> Self {
        Lens::new(|global: &G| global.clone(), |global: &mut G, value| *global = value)
    }
}

impl<G, L> Clone for Lens<G, L> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<G, L> fmt::Debug for Lens<G, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lens")
            .field("global", &std::any::type_name::<G>())
            .field("local", &std::any::type_name::<L>())
            .finish()
    }
}

/// Focus on the `Local` case of a `Global` action enum.
///
/// Laws: `extract(&embed(l)) == Some(&l)`, and `extract` returns `None` for
/// every other case.
pub struct Prism<G, L> {
    embed: EmbedFn<G, L>,
    extract: ExtractFn<G, L>,
}

impl<G, L> Prism<G, L> {
    pub fn new<Embed, Extract>(embed: Embed, extract: Extract) -> Self
    where
        Embed: Fn(L) -> G + Send + Sync + 'static,
        Extract: for<'a> Fn(&'a G) -> Option<&'a L> + Send + Sync + 'static,
    {
        Self {
            embed: Arc::new(embed),
            extract: Arc::new(extract),
        }
    }

    pub fn embed(&self, local: L) -> G {
        (self.embed)(local)
    }

    /// `None` when `global` is a different case.
    pub fn extract<'a>(&self, global: &'a G) -> Option<&'a L> {
        (self.extract)(global)
    }

    /// Focus on a case nested inside the case this prism already focuses.
    pub fn then<M>(self, inner: Prism<L, M>) -> Prism<G, M>
    where
        G: 'static,
        L: 'static,
        M: 'static,
    {
        let outer_embed = Arc::clone(&self.embed);
        let inner_embed = Arc::clone(&inner.embed);
        let outer_extract = self.extract;
        let inner_extract = inner.extract;
        Prism::new(
            move |value: M| outer_embed(inner_embed(value)),
            move |global| outer_extract(global).and_then(|local| inner_extract(local)),
        )
    }
}

impl<G: 'static> Prism<G, G> {
    /// Prism that matches every action.
    pub fn identity() -> Self {
        Prism::new(|action: G| action, |action| Some(action))
    }
}

impl<G, L> Clone for Prism<G, L> {
    fn clone(&self) -> Self {
        Self {
            embed: Arc::clone(&self.embed),
            extract: Arc::clone(&self.extract),
        }
    }
}

impl<G, L> fmt::Debug for Prism<G, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prism")
            .field("global", &std::any::type_name::<G>())
            .field("local", &std::any::type_name::<L>())
            .finish()
    }
}

/// Build a [`Lens`] from a struct type and a field path.
///
/// ```
/// use primetime::lens;
///
/// #[derive(Clone, Default)]
/// struct Inner { value: i32 }
/// #[derive(Clone, Default)]
/// struct Outer { inner: Inner }
///
/// let lens = lens!(Outer, inner.value);
/// let mut outer = Outer::default();
/// lens.set(&mut outer, 7);
/// assert_eq!(lens.get(&outer), 7);
/// ```
#[macro_export]
macro_rules! lens {
    ($global:ty, $($field:ident).+) => {
        $crate::mvi::Lens::new(
            |global: &$global| ::std::clone::Clone::clone(&global.$($field).+),
            |global: &mut $global, local| global.$($field).+ = local,
        )
    };
}

/// Build a [`Prism`] from a single-field tuple variant.
///
/// ```
/// use primetime::prism;
///
/// #[derive(Debug, PartialEq)]
/// enum Action { Count(i32), Reset }
///
/// let prism = prism!(Action::Count);
/// assert_eq!(prism.extract(&prism.embed(3)), Some(&3));
/// assert_eq!(prism.extract(&Action::Reset), None);
/// ```
#[macro_export]
macro_rules! prism {
    ($variant:path) => {
        $crate::mvi::Prism::new($variant, |global| match global {
            $variant(local) => ::std::option::Option::Some(local),
            #[allow(unreachable_patterns)]
            _ => ::std::option::Option::None,
        })
    };
}

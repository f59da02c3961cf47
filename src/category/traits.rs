use crate::error::Result;

pub trait Arrow: Sized {
    type Object;

    fn source(&self) -> Self::Object;
    fn target(&self) -> Self::Object;

    /// the identity morphism on `a`
    fn identity(a: Self::Object) -> Self;

    /// Compose morphisms in diagrammatic order: `self ; other`
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TypeMismatch`] if `self.target() != other.source()`.
    fn compose(&self, other: &Self) -> Result<Self>;
}

pub trait Coproduct: Arrow {
    /// Construct the initial arrow `initial_a : 0 → a` from some object `a`
    fn initial(a: Self::Object) -> Self;

    /// Copairing `[self, other] : A + B → C` of two arrows with a shared target.
    fn coproduct(&self, other: &Self) -> Result<Self>;

    /// Coproduct injection `ι₀ : a → a + b`
    fn inj0(a: Self::Object, b: Self::Object) -> Self;

    /// Coproduct injection `ι₁ : b → a + b`
    fn inj1(a: Self::Object, b: Self::Object) -> Self;
}

/// A (co)limit, through which every other (co)cone over the same diagram factors uniquely.
pub trait Universal {
    type Cone;
    type Arrow;

    /// The unique arrow between the apex of `cone` and the apex of `self` which commutes with
    /// the legs.
    fn universal(&self, cone: &Self::Cone) -> Result<Self::Arrow>;
}

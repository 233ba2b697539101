//! Typed contracts over bound views
//!
//! A [`Contract`] is a typed wrapper around a [`BoundView`] that knows its own
//! [`ContractShape`]. The [`contract!`](crate::contract!) macro generates the
//! wrapper, the shape, and a trait holding the contract's accessors:
//!
//! ```
//! use propbind_config::{contract, from_properties, PropertySource};
//!
//! contract! {
//!     pub struct ServerConfig: ServerProperties {
//!         fn getHost() -> String;
//!         fn getPort() -> i32;
//!     }
//! }
//!
//! let source = PropertySource::new()
//!     .with("host", "localhost")
//!     .with("port", "8080");
//!
//! let config: ServerConfig = from_properties(&source).unwrap();
//! assert_eq!(config.getHost(), "localhost");
//! assert_eq!(config.getPort(), 8080);
//! ```

use propbind_core::ContractShape;

use crate::view::BoundView;

/// A typed access contract
pub trait Contract: Sized {
    /// Shape declaring the contract's accessors, parents and overrides
    fn shape() -> ContractShape;

    /// Wrap a view bound against [`Contract::shape`]
    fn from_view(view: BoundView) -> Self;

    fn view(&self) -> &BoundView;

    /// Read this contract as one of its ancestors
    ///
    /// A child's view holds every inherited accessor under the same name, so
    /// the ancestor's accessors resolve against it unchanged.
    fn upcast<P: Contract>(&self) -> P
    where
        Self: Extends<P>,
    {
        P::from_view(self.view().clone())
    }
}

/// `Self` inherits every accessor of `P`
///
/// Every contract extends itself. `contract!` also implements this for each
/// contract named after `extends`; a contract declared elsewhere cannot be
/// reached with [`Contract::upcast`]:
///
/// ```compile_fail
/// use propbind_config::{contract, from_properties, Contract, PropertySource};
///
/// contract! {
///     pub struct Vendor: VendorProperties {
///         fn getVendorName() -> String;
///     }
/// }
///
/// contract! {
///     pub struct Listener: ListenerProperties {
///         fn getPort() -> i32;
///     }
/// }
///
/// let source = PropertySource::new().with("vendor-name", "FooBar");
/// let vendor: Vendor = from_properties(&source).unwrap();
/// let listener: Listener = vendor.upcast();
/// ```
pub trait Extends<P: Contract>: Contract {}

/// Declare a typed contract
///
/// `contract! { pub struct Name: NameProperties { ... } }` generates:
/// - a newtype `Name` over [`BoundView`](crate::BoundView) implementing
///   [`Contract`](crate::Contract);
/// - a trait `NameProperties` with one method per accessor, implemented for
///   `Name` and for every contract that [`Extends`](crate::Extends) it.
///
/// Strategy overrides and parents are optional and come before the body, in
/// this order. Inherited accessors are called directly on the child:
///
/// ```
/// use propbind_config::{
///     contract, from_properties, CamelCaseNameExtractor, Contract, DottedNameTranslator,
///     PropertySource, PropertyValidator, PropertyValue,
/// };
///
/// #[derive(Default)]
/// struct AboveZero;
///
/// impl PropertyValidator for AboveZero {
///     fn is_valid(&self, value: &PropertyValue) -> bool {
///         value.as_f64().map_or(false, |v| v > 0.0)
///     }
/// }
///
/// contract! {
///     pub struct Vendor: VendorProperties
///         extractor = CamelCaseNameExtractor;
///     {
///         fn vendorName() -> String;
///     }
/// }
///
/// contract! {
///     pub struct Engine: EngineProperties
///         extractor = CamelCaseNameExtractor;
///         translator = DottedNameTranslator;
///         extends Vendor;
///     {
///         fn engineThreshold() -> f64 => AboveZero;
///     }
/// }
///
/// let source = PropertySource::new()
///     .with("engine.threshold", 300.0f64)
///     .with("vendor.name", "FooBar");
///
/// let engine: Engine = from_properties(&source).unwrap();
/// assert_eq!(engine.engineThreshold(), 300.0);
/// assert_eq!(engine.vendorName(), "FooBar");
/// assert_eq!(engine.upcast::<Vendor>().vendorName(), "FooBar");
/// ```
///
/// Inherited accessors are resolved with the extractor and translator of the
/// contract being bound, so `vendorName` above is looked up as `vendor.name`.
/// `Extends` is not transitive: to call a grandparent's accessors on a child,
/// list the grandparent after `extends` as well. Accessors reached through
/// several parents are bound once.
#[macro_export]
macro_rules! contract {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $properties:ident
        $(extractor = $extractor:ty;)?
        $(translator = $translator:ty;)?
        $(extends $($parent:ty),+ ;)?
        {
            $(
                $(#[$accessor_meta:meta])*
                fn $accessor:ident() -> $ty:ty $(=> $validator:ty)?;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name($crate::BoundView);

        #[doc = concat!("Accessors declared by [`", stringify!($name), "`]")]
        #[allow(non_snake_case)]
        $vis trait $properties: $crate::Contract {
            $(
                $(#[$accessor_meta])*
                fn $accessor(&self) -> $ty {
                    $crate::Contract::view(self).get::<$ty>(stringify!($accessor))
                }
            )*
        }

        impl<T: $crate::Extends<$name>> $properties for T {}

        impl $crate::Extends<$name> for $name {}
        $($(impl $crate::Extends<$parent> for $name {})+)?

        impl $crate::Contract for $name {
            fn shape() -> $crate::ContractShape {
                #[allow(unused_mut)]
                let mut shape = $crate::ContractShape::interface(stringify!($name));
                $(shape = shape.with_extractor($crate::ExtractorRef::of::<$extractor>());)?
                $(shape = shape.with_translator($crate::TranslatorRef::of::<$translator>());)?
                $($(shape = shape.extends(<$parent as $crate::Contract>::shape());)+)?
                $(
                    shape = shape.getter::<$ty>(stringify!($accessor));
                    $(shape = shape.validate_with(
                        stringify!($accessor),
                        $crate::ValidatorRef::of::<$validator>(),
                    );)?
                )*
                shape
            }

            fn from_view(view: $crate::BoundView) -> Self {
                $name(view)
            }

            fn view(&self) -> &$crate::BoundView {
                &self.0
            }
        }
    };
}

//! Sparse N-dimensional matrices backed by arena-allocated index trees.
//!
//! # Overview
//! A [`Matrix<T, D>`] maps every combination of `D` non-negative indices to a value of type `T`. Almost every cell of a typical sparse matrix holds the same value, called the *default value*, and only the cells holding something else are actually stored.
//!
//! Storage is a tree of depth `D` using the technique of ["arena-allocated trees"][arena tree blog post]: the nodes live in a backing storage, a [`SparseVec`] by default, and link to each other using keys into that storage instead of pointers. Every level of the tree corresponds to one dimension, every branch keeps an ordered map from index to child, and the leaves at the bottom hold the stored values. Subtrees which contain nothing but default values are never allocated.
//!
//! # Handles
//! Cells can be read and written directly by coordinates, with [`get`], [`set`] and the `matrix[[i, j]]` indexing syntax, or through handles which index one dimension at a time: `matrix.at(i).cell(j)` returns a [`Cell`] which reads and writes the cell at `[i, j]`. Handles borrow the matrix; nothing is allocated until a non-default value is actually written through a cell, and a cell which ends up holding the default value is removed from the tree as soon as its handle is dropped.
//!
//! ```rust
//! use sparse_tree_matrix::Matrix;
//!
//! let mut matrix = Matrix::<i32, 2>::with_default(-1);
//! matrix.at(3).cell(4).set(12);
//! matrix.set([0, 1], 5);
//! assert_eq!(matrix[[3, 4]], 12);
//! assert_eq!(matrix[[9, 9]], -1);
//! assert_eq!(matrix.size(), 2);
//!
//! let cells: Vec<_> = matrix.iter().collect();
//! assert_eq!(cells, [([0, 1], &5), ([3, 4], &12)]);
//! ```
//!
//! ## Sparse storage
//! Removing cells leaves holes in the default storage, which get reused by the cells inserted afterwards. If you need to clean up all at once, you can use [`defragment`].
//!
//! # Feature flags
//! - `std` (**enabled by default**) - enables the full standard library, disabling `no_std` for the crate. Currently, this only adds [`Error`] trait implementations for the error types. An allocator is required either way.
//! - `slotmap` — adds `Storage` trait implementations for [`SlotMap`] and [`DenseSlotMap`], which can then back matrices instead of the default storage.
//! - `doc_cfg` — marks feature-gated items in the documentation. **Requires a nightly compiler.**
//!
//! # Public dependencies
//! - `arrayvec` (**required**) — `^0.7`
//! - `slotmap` (*optional*) — `^1.0`
//!
//! [`Matrix<T, D>`]: matrix/struct.Matrix.html " "
//! [`Cell`]: matrix/struct.Cell.html " "
//! [`get`]: matrix/struct.Matrix.html#method.get " "
//! [`set`]: matrix/struct.Matrix.html#method.set " "
//! [`defragment`]: matrix/struct.Matrix.html#method.defragment " "
//! [`SparseVec`]: storage/struct.SparseVec.html " "
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "
//! [arena tree blog post]: https://dev.to/deciduously/no-more-tears-no-more-knots-arena-allocated-trees-in-rust-44k6 " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    variant_size_differences,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::implicit_saturating_sub,
    clippy::inefficient_to_string,
    clippy::items_after_statements,
    clippy::large_stack_arrays,
    clippy::let_unit_value,
    clippy::macro_use_imports,
    clippy::match_same_arms,
    clippy::match_wildcard_for_single_variants,
    // sick of this stupid lint, disabling
    // clippy::module_name_repetitions,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::option_option,
    clippy::range_plus_one,
    clippy::range_minus_one,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::string_add_assign,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::trivially_copy_pass_by_ref,
    clippy::unicode_not_nfc,
    clippy::unnested_or_patterns,
    clippy::unused_self,
    clippy::used_underscore_binding,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::decimal_literal_representation,
    clippy::get_unwrap,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unneeded_field_pattern,
    clippy::unwrap_used,
    clippy::verbose_file_reads,
)]
#![deny(
    anonymous_parameters,
    bare_trait_objects,
    clippy::exit,
)]
#![allow(clippy::use_self)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

extern crate alloc;

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, DefaultStorage};

pub mod node;

pub mod matrix;
#[doc(no_inline)]
pub use matrix::{Matrix, View, Cell};

pub mod iter;
#[doc(no_inline)]
pub use iter::{Iter, CursorMut};

mod error;
pub use error::DimensionMismatchError;

#[cfg(test)]
mod proptests;

/// A prelude for using the crate, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as MatrixStorage,
        SparseVec as SparseMatrixStorage,
        DefaultStorage as DefaultMatrixStorage,
    };
    #[doc(no_inline)]
    pub use crate::matrix::{
        Matrix,
        View as MatrixView,
        Cell as MatrixCell,
    };
    #[doc(no_inline)]
    pub use crate::DimensionMismatchError;
}

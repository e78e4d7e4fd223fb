//! Static shapes and runtime extents.

use core::fmt;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{TensorError, TensorResult, check};
use crate::index::{IndexMap, MAX_INDICES};

/// Marker for an axis whose size is only known at runtime.
pub const DYNAMIC: usize = usize::MAX;

/// Maximum number of axes of a shape.
pub const MAX_RANK: usize = MAX_INDICES;

/// The static shape of a tensor type.
///
/// Each axis is either a size known while compiling or [`DYNAMIC`]. All
/// operations are `const fn` so shapes can be combined in associated consts.
///
/// Serialized as a list with `null` for dynamic axes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<usize>>", into = "Vec<Option<usize>>")]
pub struct Shape {
    axes: [usize; MAX_RANK],
    rank: usize,
}

impl Shape {
    /// The shape of a rank-0 tensor.
    pub const SCALAR: Self = Self {
        axes: [0; MAX_RANK],
        rank: 0,
    };

    /// Creates a shape from per-axis sizes. Use [`DYNAMIC`] for runtime axes.
    pub const fn new(axes: &[usize]) -> Self {
        assert!(axes.len() <= MAX_RANK, "shape rank exceeds MAX_RANK");
        let mut out = Self::SCALAR;
        let mut i = 0;
        while i < axes.len() {
            out.axes[i] = axes[i];
            i += 1;
        }
        out.rank = axes.len();
        out
    }

    /// A shape with `rank` dynamic axes.
    pub const fn dynamic(rank: usize) -> Self {
        assert!(rank <= MAX_RANK, "shape rank exceeds MAX_RANK");
        let mut out = Self::SCALAR;
        let mut i = 0;
        while i < rank {
            out.axes[i] = DYNAMIC;
            i += 1;
        }
        out.rank = rank;
        out
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// The static size of `axis`, or [`DYNAMIC`].
    pub const fn get(&self, axis: usize) -> usize {
        assert!(axis < self.rank, "shape axis out of range");
        self.axes[axis]
    }

    pub const fn is_dynamic(&self, axis: usize) -> bool {
        self.get(axis) == DYNAMIC
    }

    /// Axis-wise concatenation.
    pub const fn concat(&self, other: &Self) -> Self {
        assert!(
            self.rank + other.rank <= MAX_RANK,
            "shape rank exceeds MAX_RANK"
        );
        let mut out = *self;
        let mut i = 0;
        while i < other.rank {
            out.axes[self.rank + i] = other.axes[i];
            i += 1;
        }
        out.rank = self.rank + other.rank;
        out
    }

    /// Adds a leading axis of static size `extent` (or [`DYNAMIC`]).
    pub const fn prepend(&self, extent: usize) -> Self {
        Self::new(&[extent]).concat(self)
    }

    /// Builds the shape whose axis `k` is axis `map[k]` of `self`.
    pub const fn select(&self, map: &IndexMap) -> Self {
        let mut out = Self::SCALAR;
        let mut k = 0;
        while k < map.len() {
            out.axes[k] = self.get(map.get(k));
            k += 1;
        }
        out.rank = map.len();
        out
    }

    /// True when ranks agree and every axis is dynamic on one side or equal.
    pub const fn is_compatible(&self, other: &Self) -> bool {
        if self.rank != other.rank {
            return false;
        }
        let mut i = 0;
        while i < self.rank {
            let (a, b) = (self.axes[i], other.axes[i]);
            if a != DYNAMIC && b != DYNAMIC && a != b {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Combines two compatible shapes, keeping the static side of each axis.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in const context) if the shapes are not
    /// compatible.
    pub const fn merge(&self, other: &Self) -> Self {
        assert!(self.is_compatible(other), "merged shapes are not compatible");
        let mut out = *self;
        let mut i = 0;
        while i < self.rank {
            if out.axes[i] == DYNAMIC {
                out.axes[i] = other.axes[i];
            }
            i += 1;
        }
        out
    }

    pub const fn equals(&self, other: &Self) -> bool {
        if self.rank != other.rank {
            return false;
        }
        let mut i = 0;
        while i < self.rank {
            if self.axes[i] != other.axes[i] {
                return false;
            }
            i += 1;
        }
        true
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.axes[..self.rank]
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::SCALAR
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for &axis in self.as_slice() {
            match axis {
                DYNAMIC => list.entry(&format_args!("?")),
                n => list.entry(&n),
            };
        }
        list.finish()
    }
}

/// Runtime extents: a [`Shape`] plus the actual size of every axis.
///
/// Static axes always carry their static size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ExtentsRepr", into = "ExtentsRepr")]
pub struct Extents {
    shape: Shape,
    values: [usize; MAX_RANK],
}

impl Extents {
    /// Extents of a rank-0 tensor.
    pub const SCALAR: Self = Self {
        shape: Shape::SCALAR,
        values: [0; MAX_RANK],
    };

    /// Creates extents from a shape and the runtime size of every axis.
    ///
    /// # Panics
    ///
    /// Panics if the ranks differ or a static axis is given another size.
    pub const fn new(shape: Shape, values: &[usize]) -> Self {
        assert!(shape.rank() == values.len(), "extents rank does not match shape");
        let mut out = Self {
            shape,
            values: [0; MAX_RANK],
        };
        let mut i = 0;
        while i < values.len() {
            let s = shape.get(i);
            assert!(
                s == DYNAMIC || s == values[i],
                "runtime extent disagrees with static shape"
            );
            out.values[i] = values[i];
            i += 1;
        }
        out
    }

    /// Like [`Extents::new`], returning an error instead of panicking.
    pub fn try_new(shape: Shape, values: &[usize]) -> TensorResult<Self> {
        if shape.rank() != values.len() {
            return Err(TensorError::RankMismatch {
                expected: shape.rank(),
                got: values.len(),
            });
        }
        for (axis, &got) in values.iter().enumerate() {
            let expected = shape.get(axis);
            if expected != DYNAMIC && expected != got {
                return Err(TensorError::ExtentMismatch {
                    axis,
                    expected,
                    got,
                });
            }
        }
        Ok(Self::new(shape, values))
    }

    /// Fully dynamic extents.
    pub const fn dynamic(values: &[usize]) -> Self {
        Self::new(Shape::dynamic(values.len()), values)
    }

    /// Extents of a shape with no runtime information; dynamic axes are empty.
    pub const fn from_shape(shape: Shape) -> Self {
        let mut out = Self {
            shape,
            values: [0; MAX_RANK],
        };
        let mut i = 0;
        while i < shape.rank() {
            if !shape.is_dynamic(i) {
                out.values[i] = shape.get(i);
            }
            i += 1;
        }
        out
    }

    #[inline]
    pub const fn rank(&self) -> usize {
        self.shape.rank()
    }

    #[inline]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Runtime size of `axis`.
    #[inline]
    pub const fn extent(&self, axis: usize) -> usize {
        assert!(axis < self.rank(), "extents axis out of range");
        self.values[axis]
    }

    /// Static size of `axis`, or [`DYNAMIC`].
    pub const fn static_extent(&self, axis: usize) -> usize {
        self.shape.get(axis)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.values[..self.rank()]
    }

    /// The runtime sizes as an owned list.
    pub fn dims(&self) -> SmallVec<[usize; 8]> {
        SmallVec::from_slice(self.as_slice())
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.as_slice().iter().product()
    }

    pub const fn concat(&self, other: &Self) -> Self {
        let mut out = Self {
            shape: self.shape.concat(&other.shape),
            values: self.values,
        };
        let mut i = 0;
        while i < other.rank() {
            out.values[self.rank() + i] = other.values[i];
            i += 1;
        }
        out
    }

    /// Adds a leading axis of static size `extent` and runtime size `runtime`.
    pub const fn prepend(&self, extent: usize, runtime: usize) -> Self {
        Self::new(Shape::new(&[extent]), &[runtime]).concat(self)
    }

    /// Builds the extents whose axis `k` is axis `map[k]` of `self`.
    pub const fn select(&self, map: &IndexMap) -> Self {
        let mut out = Self {
            shape: self.shape.select(map),
            values: [0; MAX_RANK],
        };
        let mut k = 0;
        while k < map.len() {
            out.values[k] = self.extent(map.get(k));
            k += 1;
        }
        out
    }

    /// Checks compatibility with `other`.
    ///
    /// Static disagreements are reported before runtime ones.
    pub fn check_compatible(&self, other: &Self) -> TensorResult<()> {
        if self.rank() != other.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.rank(),
                got: other.rank(),
            });
        }

        for axis in 0..self.rank() {
            let (left, right) = (self.static_extent(axis), other.static_extent(axis));
            if left != DYNAMIC && right != DYNAMIC && left != right {
                return Err(TensorError::IncompatibleExtents { axis, left, right });
            }
        }

        for axis in 0..self.rank() {
            if self.values[axis] != other.values[axis] {
                return Err(TensorError::ExtentMismatch {
                    axis,
                    expected: self.values[axis],
                    got: other.values[axis],
                });
            }
        }

        Ok(())
    }

    /// Returns whether the runtime sizes agree.
    ///
    /// # Panics
    ///
    /// Panics if the ranks differ or two static sizes disagree: those are
    /// structural errors, not runtime mismatches.
    pub fn compatible(&self, other: &Self) -> bool {
        match self.check_compatible(other) {
            Ok(()) => true,
            Err(TensorError::ExtentMismatch { .. }) => false,
            Err(err) => panic!("{}", err),
        }
    }

    /// Combines two compatible extents, keeping the static side of each axis.
    pub fn merge(&self, other: &Self) -> Self {
        check!(self.check_compatible(other));
        let mut out = Self {
            shape: self.shape.merge(&other.shape),
            values: self.values,
        };
        for axis in 0..self.rank() {
            if self.shape.is_dynamic(axis) && !other.shape.is_dynamic(axis) {
                out.values[axis] = other.values[axis];
            }
        }
        out
    }

    /// Checks that `index` addresses an element.
    pub fn check_bounds(&self, index: &[usize]) -> TensorResult<()> {
        if index.len() != self.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.rank(),
                got: index.len(),
            });
        }
        for (axis, (&i, &extent)) in index.iter().zip(self.as_slice()).enumerate() {
            if i >= extent {
                return Err(TensorError::OutOfBounds {
                    axis,
                    index: i,
                    extent,
                });
            }
        }
        Ok(())
    }

    pub fn contains(&self, index: &[usize]) -> bool {
        self.check_bounds(index).is_ok()
    }
}

impl TryFrom<Vec<Option<usize>>> for Shape {
    type Error = TensorError;

    fn try_from(axes: Vec<Option<usize>>) -> TensorResult<Self> {
        if axes.len() > MAX_RANK {
            return Err(TensorError::TooManyAxes {
                rank: axes.len(),
                max: MAX_RANK,
            });
        }
        let mut out = Self::SCALAR;
        for (i, axis) in axes.iter().enumerate() {
            out.axes[i] = axis.unwrap_or(DYNAMIC);
        }
        out.rank = axes.len();
        Ok(out)
    }
}

impl From<Shape> for Vec<Option<usize>> {
    fn from(shape: Shape) -> Self {
        shape
            .as_slice()
            .iter()
            .map(|&axis| (axis != DYNAMIC).then_some(axis))
            .collect()
    }
}

#[derive(Serialize, Deserialize)]
struct ExtentsRepr {
    shape: Shape,
    values: Vec<usize>,
}

impl TryFrom<ExtentsRepr> for Extents {
    type Error = TensorError;

    fn try_from(repr: ExtentsRepr) -> TensorResult<Self> {
        Self::try_new(repr.shape, &repr.values)
    }
}

impl From<Extents> for ExtentsRepr {
    fn from(extents: Extents) -> Self {
        Self {
            shape: extents.shape,
            values: extents.as_slice().to_vec(),
        }
    }
}

impl Default for Extents {
    fn default() -> Self {
        Self::SCALAR
    }
}

impl fmt::Debug for Extents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extents")
            .field("shape", &self.shape)
            .field("values", &self.as_slice())
            .finish()
    }
}

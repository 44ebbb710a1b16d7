use crate::error::MorphologyError;

/// Shape of a flat structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Shape {
    /// Every cell of the square is hit
    #[default]
    Rectangle,
    /// Center row and center column
    Cross,
    /// Filled ellipse inscribed in the square
    Ellipse,
}

/// Flat structuring element with an odd side length and a centered origin.
///
/// The element is stored as the list of hit offsets `(dx, dy)` relative to
/// the origin, so dilation and erosion never need to know the shape.
///
/// # Examples
///
/// ```rust
/// use morphox::{Shape, StructuringElement};
///
/// let square = StructuringElement::square(3).unwrap();
/// assert_eq!(square.offsets().len(), 9);
///
/// let cross = StructuringElement::new(Shape::Cross, 5).unwrap();
/// assert_eq!(cross.offsets().len(), 9);
/// assert!(cross.contains(0, -2));
/// assert!(!cross.contains(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    shape: Shape,
    size: u32,
    offsets: Vec<(i32, i32)>,
}

impl StructuringElement {
    /// Create a structuring element of the given shape and side length.
    ///
    /// # Errors
    ///
    /// * `MorphologyError::InvalidKernelSize` - If `size` is zero or even
    pub fn new(shape: Shape, size: u32) -> Result<Self, MorphologyError> {
        validate_kernel_size(size)?;
        Ok(Self {
            shape,
            size,
            offsets: rasterize(shape, size),
        })
    }

    /// Create a flat square element, the kernel every structural operation
    /// uses by default.
    pub fn square(size: u32) -> Result<Self, MorphologyError> {
        Self::new(Shape::Rectangle, size)
    }

    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Side length of the bounding square
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Distance from the origin to the edge of the bounding square
    pub const fn radius(&self) -> u32 {
        self.size / 2
    }

    /// Hit cells as `(dx, dy)` offsets from the origin, in row-major order
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        self.offsets.contains(&(dx, dy))
    }

    /// Whether every cell of the bounding square is hit.
    ///
    /// Rectangular elements are separable into a row pass and a column pass.
    pub fn is_rectangular(&self) -> bool {
        self.offsets.len() == (self.size as usize).pow(2)
    }
}

/// Checks that a kernel size is a positive odd integer.
pub fn validate_kernel_size(size: u32) -> Result<(), MorphologyError> {
    if size == 0 || size % 2 == 0 {
        return Err(MorphologyError::InvalidKernelSize { size });
    }
    Ok(())
}

fn rasterize(shape: Shape, size: u32) -> Vec<(i32, i32)> {
    let radius = (size / 2) as i32;
    if radius == 0 {
        return vec![(0, 0)];
    }

    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        let half_width = match shape {
            Shape::Rectangle => radius,
            Shape::Cross if dy == 0 => radius,
            Shape::Cross => 0,
            Shape::Ellipse => {
                let r = f64::from(radius);
                let dy = f64::from(dy);
                (r * ((r * r - dy * dy) / (r * r)).sqrt()).round() as i32
            }
        };
        offsets.extend((-half_width..=half_width).map(|dx| (dx, dy)));
    }
    offsets
}

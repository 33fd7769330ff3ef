//! Unit conversion utilities.
//!
//! Layout works in millimetres, PDF user space in points (1/72 inch) and
//! WordprocessingML in twips (1/20 point) and half-points.

pub const MM_PER_INCH: f64 = 25.4;
pub const PT_PER_INCH: f64 = 72.0;
pub const TWIPS_PER_PT: f64 = 20.0;

#[inline]
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_INCH / MM_PER_INCH
}

#[inline]
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / PT_PER_INCH
}

#[inline]
pub fn mm_to_twips(mm: f64) -> u32 {
    (mm_to_pt(mm) * TWIPS_PER_PT).round() as u32
}

/// Font size in points to the half-point value used by `w:sz`.
#[inline]
pub fn pt_to_half_points(pt: f64) -> u32 {
    (pt * 2.0).round() as u32
}

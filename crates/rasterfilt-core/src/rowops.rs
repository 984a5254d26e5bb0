//! Word-level row operations for bit-packed binary rasters
//!
//! Rows are packed MSB-first: cell 0 occupies bit 31 of the first word.
//! Positive shift moves row content toward higher cell indices (right);
//! negative shift moves it toward lower indices (left). Cells shifted in
//! from outside the row read as clear, so an AND against them clears the
//! corresponding destination cells while an OR leaves them alone.

/// Fetch word `w` of a row, with everything outside the row reading as 0.
#[inline]
fn fetch(src: &[u32], w: i64) -> u32 {
    if (0..src.len() as i64).contains(&w) {
        src[w as usize]
    } else {
        0
    }
}

/// The 32 bits of `src` that land in destination word `i` after the row
/// content moves by `shift` cells.
///
/// Bit `p` (counted from the MSB) of destination word `i` holds source
/// cell `32*i + p - shift`, so the result is a splice of at most two
/// adjacent source words, cut at the bit offset of the first cell.
#[inline]
fn shifted_word(src: &[u32], i: usize, shift: i32) -> u32 {
    let first = i as i64 * 32 - i64::from(shift);
    let w = first.div_euclid(32);
    let b = first.rem_euclid(32) as u32;
    let head = fetch(src, w);
    if b == 0 {
        head
    } else {
        (head << b) | (fetch(src, w + 1) >> (32 - b))
    }
}

/// Shift `src` by `shift` cells and OR into `dst`.
pub fn shift_or_row(dst: &mut [u32], src: &[u32], shift: i32) {
    for (i, d) in dst.iter_mut().enumerate() {
        *d |= shifted_word(src, i, shift);
    }
}

/// Shift `src` by `shift` cells and AND into `dst`.
pub fn shift_and_row(dst: &mut [u32], src: &[u32], shift: i32) {
    for (i, d) in dst.iter_mut().enumerate() {
        *d &= shifted_word(src, i, shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_from_bits(bits: &[u32], wpl: usize) -> Vec<u32> {
        let mut row = vec![0u32; wpl];
        for &x in bits {
            row[x as usize / 32] |= 0x8000_0000u32 >> (x % 32);
        }
        row
    }

    fn bits_of(row: &[u32]) -> Vec<u32> {
        let mut out = Vec::new();
        for (w, &word) in row.iter().enumerate() {
            for b in 0..32 {
                if word & (0x8000_0000u32 >> b) != 0 {
                    out.push(w as u32 * 32 + b);
                }
            }
        }
        out
    }

    #[test]
    fn test_zero_shift_is_plain_combine() {
        let src = row_from_bits(&[0, 31, 32, 63], 2);
        let mut dst = row_from_bits(&[1, 32], 2);
        shift_or_row(&mut dst, &src, 0);
        assert_eq!(bits_of(&dst), vec![0, 1, 31, 32, 63]);

        let mut dst = row_from_bits(&[0, 5, 32], 2);
        shift_and_row(&mut dst, &src, 0);
        assert_eq!(bits_of(&dst), vec![0, 32]);
    }

    #[test]
    fn test_shift_or_right_across_word_boundary() {
        let src = row_from_bits(&[30], 2);
        let mut dst = vec![0u32; 2];
        shift_or_row(&mut dst, &src, 3);
        assert_eq!(bits_of(&dst), vec![33]);
    }

    #[test]
    fn test_shift_or_left_across_word_boundary() {
        let src = row_from_bits(&[33], 2);
        let mut dst = vec![0u32; 2];
        shift_or_row(&mut dst, &src, -3);
        assert_eq!(bits_of(&dst), vec![30]);
    }

    #[test]
    fn test_shift_or_whole_words() {
        let src = row_from_bits(&[0, 40], 3);
        let mut dst = vec![0u32; 3];
        shift_or_row(&mut dst, &src, 32);
        assert_eq!(bits_of(&dst), vec![32, 72]);

        let mut dst = vec![0u32; 3];
        shift_or_row(&mut dst, &src, -32);
        assert_eq!(bits_of(&dst), vec![8]);
    }

    #[test]
    fn test_shift_and_clears_outside_range() {
        let src = row_from_bits(&[0, 5, 40], 2);
        let mut dst = vec![!0u32; 2];
        shift_and_row(&mut dst, &src, 2);
        assert_eq!(bits_of(&dst), vec![2, 7, 42]);
    }

    #[test]
    fn test_shift_and_vacated_cells_read_clear() {
        // Left shift leaves the tail of the row with no source cells
        let src = row_from_bits(&[10, 60], 2);
        let mut dst = vec![!0u32; 2];
        shift_and_row(&mut dst, &src, -9);
        assert_eq!(bits_of(&dst), vec![1, 51]);
    }

    #[test]
    fn test_shift_beyond_row_width() {
        let src = row_from_bits(&[1], 1);
        let mut dst_or = vec![0u32; 1];
        shift_or_row(&mut dst_or, &src, 40);
        assert!(bits_of(&dst_or).is_empty());

        let mut dst_and = vec![!0u32; 1];
        shift_and_row(&mut dst_and, &src, -40);
        assert!(bits_of(&dst_and).is_empty());
    }

    #[test]
    fn test_matches_per_cell_reference() {
        let cells: Vec<u32> = vec![0, 1, 13, 31, 32, 33, 45, 64, 69];
        let src = row_from_bits(&cells, 3);
        for shift in [-70, -33, -32, -7, -1, 0, 1, 7, 32, 33, 70] {
            let mut dst = vec![0u32; 3];
            shift_or_row(&mut dst, &src, shift);
            let expected: Vec<u32> = cells
                .iter()
                .filter_map(|&c| {
                    let moved = i64::from(c) + i64::from(shift);
                    (0..96).contains(&moved).then_some(moved as u32)
                })
                .collect();
            assert_eq!(bits_of(&dst), expected, "shift {shift}");
        }
    }
}

use proptest::prelude::*;
use pulp_dsp::filtering::{
    conv_output_len, conv_scratch1_len, conv_scratch2_len, convolve_fast, convolve_precise,
};
use pulp_dsp::matrix::{mat_cmplx_mult, mat_mult_fast, MatrixQ15, MatrixQ15Mut};
use pulp_dsp::DspError;

const SENTINEL: i16 = 0x5A5A;

fn precise(a: &[i16], b: &[i16]) -> Vec<i16> {
    let mut dst = vec![SENTINEL; conv_output_len(a.len(), b.len()) + 4];
    let mut s1 = vec![0i16; conv_scratch1_len(a.len(), b.len())];
    let mut s2 = vec![0i16; conv_scratch2_len(a.len(), b.len())];
    convolve_precise(a, b, &mut dst, &mut s1, &mut s2);
    dst
}

fn fast(a: &[i16], b: &[i16]) -> Vec<i16> {
    let mut dst = vec![SENTINEL; conv_output_len(a.len(), b.len()) + 4];
    convolve_fast(a, b, &mut dst);
    dst
}

/// Bits needed to count to `n`.
fn bits(n: usize) -> u32 {
    usize::BITS - n.leading_zeros()
}

// Property 1: both convolutions are commutative (bit-exact)
proptest! {
    #[test]
    fn prop_convolution_commutative(
        a in prop::collection::vec(any::<i16>(), 1..80),
        b in prop::collection::vec(any::<i16>(), 1..80)
    ) {
        prop_assert_eq!(fast(&a, &b), fast(&b, &a));
        prop_assert_eq!(precise(&a, &b), precise(&b, &a));
    }
}

// Property 2: exactly m + n - 1 samples are written
proptest! {
    #[test]
    fn prop_length_invariant(
        a in prop::collection::vec(any::<i16>(), 1..64),
        b in prop::collection::vec(any::<i16>(), 1..64)
    ) {
        let len = a.len() + b.len() - 1;
        let f = fast(&a, &b);
        let p = precise(&a, &b);
        prop_assert!(f[len..].iter().all(|&s| s == SENTINEL));
        prop_assert!(p[len..].iter().all(|&s| s == SENTINEL));
    }
}

// Property 3: fast and precise agree once inputs are scaled down by
// log2 of the shorter length
proptest! {
    #[test]
    fn prop_cross_variant_agreement(
        a in prop::collection::vec(any::<i16>(), 1..100),
        b in prop::collection::vec(any::<i16>(), 1..100)
    ) {
        let shift = bits(a.len().min(b.len()));
        let a: Vec<i16> = a.iter().map(|&s| s >> shift).collect();
        let b: Vec<i16> = b.iter().map(|&s| s >> shift).collect();
        prop_assert_eq!(fast(&a, &b), precise(&a, &b));
    }
}

// Property 4: precise convolution never wraps: the sign of a single-tap
// product is preserved
proptest! {
    #[test]
    fn prop_precise_single_tap_sign(
        a in prop::collection::vec(any::<i16>(), 1..50),
        k in any::<i16>()
    ) {
        let out = precise(&a, &[k]);
        for (i, &x) in a.iter().enumerate() {
            let exact = (x as i64 * k as i64) >> 15;
            prop_assert_eq!(out[i] as i64, exact.clamp(-32768, 32767));
        }
    }
}

// Property 5: 0.5·I × B == B/2
proptest! {
    #[test]
    fn prop_half_identity(
        n in 1u16..8,
        cols in 1u16..8,
        seed in prop::collection::vec(any::<i16>(), 64)
    ) {
        let mut ident = vec![0i16; n as usize * n as usize];
        for i in 0..n as usize {
            ident[i * n as usize + i] = 1 << 14;
        }
        let b = &seed[..n as usize * cols as usize];
        let mut out = vec![0i16; b.len()];
        let mut scratch = vec![0i16; b.len()];
        mat_mult_fast(
            &MatrixQ15::new(n, n, &ident),
            &MatrixQ15::new(n, cols, b),
            &mut MatrixQ15Mut::new(n, cols, &mut out),
            &mut scratch,
        ).unwrap();
        for (&o, &x) in out.iter().zip(b) {
            prop_assert_eq!(o, x >> 1);
        }
    }
}

// Property 6: mismatched shapes are rejected without touching any buffer
proptest! {
    #[test]
    fn prop_size_mismatch_is_clean(
        ar in 1u16..6, ac in 1u16..6, br in 1u16..6, bc in 1u16..6
    ) {
        prop_assume!(ac != br);
        let a = vec![1i16; 2 * ar as usize * ac as usize];
        let b = vec![1i16; 2 * br as usize * bc as usize];
        let mut out = vec![SENTINEL; 2 * ar as usize * bc as usize];
        let mut scratch = vec![SENTINEL; b.len()];

        let real = mat_mult_fast(
            &MatrixQ15::new(ar, ac, &a),
            &MatrixQ15::new(br, bc, &b),
            &mut MatrixQ15Mut::new(ar, bc, &mut out),
            &mut scratch,
        );
        let is_mismatch = matches!(real, Err(DspError::SizeMismatch { .. }));
        prop_assert!(is_mismatch);

        let cmplx = mat_cmplx_mult(
            &MatrixQ15::new(ar, ac, &a),
            &MatrixQ15::new(br, bc, &b),
            &mut MatrixQ15Mut::new(ar, bc, &mut out),
            &mut scratch,
        );
        let is_mismatch = matches!(cmplx, Err(DspError::SizeMismatch { .. }));
        prop_assert!(is_mismatch);

        prop_assert!(out.iter().all(|&s| s == SENTINEL));
        prop_assert!(scratch.iter().all(|&s| s == SENTINEL));
    }
}

// Property 7: complex product against a direct i64 reference
proptest! {
    #[test]
    fn prop_complex_matches_reference(
        rows in 1u16..5,
        inner in 1u16..5,
        cols in 1u16..5,
        a in prop::collection::vec(any::<i16>(), 50),
        b in prop::collection::vec(any::<i16>(), 50)
    ) {
        let (r, k, c) = (rows as usize, inner as usize, cols as usize);
        let a = &a[..2 * r * k];
        let b = &b[..2 * k * c];
        let mut out = vec![0i16; 2 * r * c];
        let mut scratch = vec![0i16; 2 * k * c];
        mat_cmplx_mult(
            &MatrixQ15::new(rows, inner, a),
            &MatrixQ15::new(inner, cols, b),
            &mut MatrixQ15Mut::new(rows, cols, &mut out),
            &mut scratch,
        ).unwrap();

        for i in 0..r {
            for j in 0..c {
                let (mut re, mut im) = (0i64, 0i64);
                for t in 0..k {
                    let (ar, ai) = (a[2 * (i * k + t)] as i64, a[2 * (i * k + t) + 1] as i64);
                    let (br, bi) = (b[2 * (t * c + j)] as i64, b[2 * (t * c + j) + 1] as i64);
                    re += ar * br - ai * bi;
                    im += ar * bi + ai * br;
                }
                prop_assert_eq!(out[2 * (i * c + j)] as i64, (re >> 15).clamp(-32768, 32767));
                prop_assert_eq!(out[2 * (i * c + j) + 1] as i64, (im >> 15).clamp(-32768, 32767));
            }
        }
    }
}

// Property 8: saturating offset agrees with i16::saturating_add
#[cfg(feature = "basic")]
proptest! {
    #[test]
    fn prop_offset_saturates(
        src in prop::collection::vec(any::<i16>(), 0..40),
        offset in any::<i16>()
    ) {
        let mut dst = vec![0i16; src.len()];
        pulp_dsp::basic::offset_q15(&src, offset, &mut dst);
        for (&d, &s) in dst.iter().zip(&src) {
            prop_assert_eq!(d, s.saturating_add(offset));
        }
    }
}

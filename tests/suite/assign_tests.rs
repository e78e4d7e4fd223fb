//! Assignment through bound expressions and plain tensors.

use cubek_ttl::{
    Idx, TensorError, TensorExt, TensorMutExt, TensorSpan, TensorSpanMut, assign, bind,
    try_assign,
};
use pretty_assertions::assert_eq;

const I: Idx<'i'> = Idx;
const J: Idx<'j'> = Idx;
const K: Idx<'k'> = Idx;

#[test]
fn test_assign_scalar_from_contraction() {
    let a = [[1, 0], [0, 2]];
    let mut t = 0;
    assign(&mut t, &bind(&a, (I, I)));
    assert_eq!(t, 3);
}

#[test]
fn test_assign_through_scalar_bind() {
    let mut x = 0.0f64;
    let mut b = bind(&mut x, ());
    b <<= 2.5f64;
    assert_eq!(x, 2.5);
}

#[test]
fn test_assign_column() {
    let mut a = [[0; 3]; 2];
    let v = [7, 8];
    {
        let mut column = bind(&mut a, (I, 2usize));
        column <<= bind(&v, I);
    }
    assert_eq!(a, [[0, 0, 7], [0, 0, 8]]);
}

#[test]
fn test_assign_row_from_matrix_column() {
    let src = [[1, 2], [3, 4]];
    let mut dst = [[0; 2]; 2];
    {
        let mut row = bind(&mut dst, (0usize, J));
        row <<= bind(&src, (J, 1usize));
    }
    assert_eq!(dst, [[2, 4], [0, 0]]);
}

#[test]
fn test_transpose_into_span() {
    let src = [[1, 2, 3], [4, 5, 6]];
    let mut storage = vec![0; 6];
    {
        let span = TensorSpanMut::new(&mut storage, [3, 2]);
        let mut dst = bind(span, (J, I));
        dst <<= bind(&src, (I, J));
    }
    assert_eq!(storage, vec![1, 4, 2, 5, 3, 6]);
}

#[test]
fn test_matrix_product_into_vec() {
    let a = vec![vec![1, 2, 3], vec![4, 5, 6]];
    let b = vec![vec![1, 0], vec![0, 1], vec![1, 1]];
    let mut c = vec![vec![0; 2]; 2];
    {
        let mut dst = bind(&mut c, (I, J));
        dst <<= bind(&a, (I, K)) * bind(&b, (K, J));
    }
    assert_eq!(c, vec![vec![4, 5], vec![10, 11]]);
}

#[test]
fn test_axpy() {
    let x = [1.0f32, 2.0, 3.0];
    let mut y = [1.0f32, 1.0, 1.0];
    {
        let mut dst = bind(&mut y, I);
        dst += 2.0f32 * bind(&x, I);
    }
    assert_eq!(y, [3.0, 5.0, 7.0]);
}

#[test]
fn test_assign_from_method() {
    let src = [[1u16, 2], [3, 4]];
    let mut dst = [[0u64; 2]; 2];
    dst.assign_from(&src);
    assert_eq!(dst, [[1, 2], [3, 4]]);
}

#[test]
fn test_try_assign_shape_mismatch() {
    let data = [1, 2, 3, 4, 5, 6];
    let src = TensorSpan::new(&data, [2, 3]);
    let mut dst = vec![vec![0; 2]; 3];
    assert_eq!(
        try_assign(&mut dst, &src),
        Err(TensorError::ExtentMismatch {
            axis: 0,
            expected: 3,
            got: 2
        })
    );
    assert_eq!(dst, vec![vec![0; 2]; 3]);
}

#[test]
fn test_try_assign_permuted() {
    let data = [1, 2, 3, 4, 5, 6];
    let src = TensorSpan::new(&data, [2, 3]);
    let mut dst = vec![vec![0; 2]; 3];
    assert!(try_assign(&mut bind(&mut dst, (J, I)), &bind(src, (I, J))).is_ok());
    assert_eq!(dst, vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
}

#[test]
fn test_read_back_through_same_bind() {
    let a = [[1, 2], [3, 4]];
    let mut c = [[0; 2]; 2];
    {
        let mut dst = bind(&mut c, (J, I));
        dst <<= bind(&a, (I, J));
    }
    let back = bind(&c, (J, I));
    let original = bind(&a, (I, J));
    let diff = bind(back - original, (K, K));
    assert_eq!(diff.value(), 0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "extent mismatch on axis 0")]
fn test_assign_mismatch_panics() {
    let src = vec![1, 2, 3];
    let mut dst = vec![0; 2];
    assign(&mut dst, &src);
}

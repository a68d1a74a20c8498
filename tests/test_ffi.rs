// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use edgefirst_edges::ffi::{
    edgefirst_process_frame, edgefirst_process_frame_with_thresholds, edgefirst_strerror,
    EDGEFIRST_EEMPTY, EDGEFIRST_ENEGATIVE, EDGEFIRST_ENULL,
    EDGEFIRST_ESHORT, EDGEFIRST_ESTRIDE, EDGEFIRST_ETHRESHOLD, EDGEFIRST_OK,
};
use std::{error::Error, ffi::CStr, ptr::null};

fn step_plane(stride: usize) -> Vec<u8> {
    let mut plane = vec![0xFFu8; stride * 4];
    for row in plane.chunks_exact_mut(stride) {
        row[..4].copy_from_slice(&[0, 0, 255, 255]);
    }
    plane
}

#[test]
fn test_process_frame() -> Result<(), Box<dyn Error>> {
    let plane = step_plane(8);
    let mut rgba = vec![0u8; 64];

    let ret = unsafe {
        edgefirst_process_frame(4, 4, plane.as_ptr(), plane.len(), 8, rgba.as_mut_ptr(), rgba.len(), 0)
    };
    assert_eq!(ret, EDGEFIRST_OK);

    for (i, px) in rgba.chunks_exact(4).enumerate() {
        let v = if i % 4 == 1 { 255 } else { 0 };
        assert_eq!(px, [v, v, v, 255], "pixel {}", i);
    }
    Ok(())
}

#[test]
fn test_process_frame_with_thresholds() {
    // 22 * 4 = 88, below the default high threshold
    let plane = [0u8, 0, 22, 22].repeat(4);
    let mut rgba = vec![0u8; 64];

    let ret = unsafe {
        edgefirst_process_frame(4, 4, plane.as_ptr(), plane.len(), 4, rgba.as_mut_ptr(), rgba.len(), 16)
    };
    assert_eq!(ret, EDGEFIRST_OK);
    assert!(rgba.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));

    let ret = unsafe {
        edgefirst_process_frame_with_thresholds(
            4,
            4,
            plane.as_ptr(),
            plane.len(),
            4,
            rgba.as_mut_ptr(),
            rgba.len(),
            16,
            40.0,
            60.0,
        )
    };
    assert_eq!(ret, EDGEFIRST_OK);
    assert_eq!(rgba.chunks_exact(4).filter(|px| px[0] == 255).count(), 4);

    let ret = unsafe {
        edgefirst_process_frame_with_thresholds(
            4,
            4,
            plane.as_ptr(),
            plane.len(),
            4,
            rgba.as_mut_ptr(),
            rgba.len(),
            16,
            f64::NAN,
            60.0,
        )
    };
    assert_eq!(ret, EDGEFIRST_ETHRESHOLD);
}

#[test]
fn test_null_buffers() {
    let plane = step_plane(4);
    let mut rgba = vec![7u8; 64];

    let ret = unsafe { edgefirst_process_frame(4, 4, null(), 16, 4, rgba.as_mut_ptr(), 64, 0) };
    assert_eq!(ret, EDGEFIRST_ENULL);

    let ret = unsafe {
        edgefirst_process_frame(4, 4, plane.as_ptr(), 16, 4, std::ptr::null_mut(), 64, 0)
    };
    assert_eq!(ret, EDGEFIRST_ENULL);
    assert!(rgba.iter().all(|&b| b == 7));
}

#[test]
fn test_invalid_arguments() {
    let plane = step_plane(4);
    let mut rgba = vec![7u8; 64];
    let call = |w, h, plane_len, stride, rgba: &mut [u8], rgba_stride| unsafe {
        edgefirst_process_frame(
            w,
            h,
            plane.as_ptr(),
            plane_len,
            stride,
            rgba.as_mut_ptr(),
            rgba.len(),
            rgba_stride,
        )
    };

    assert_eq!(call(-4, 4, 16, 4, &mut rgba, 0), EDGEFIRST_ENEGATIVE);
    assert_eq!(call(4, 4, 16, -1, &mut rgba, 0), EDGEFIRST_ENEGATIVE);
    assert_eq!(call(4, 4, 16, 4, &mut rgba, -16), EDGEFIRST_ENEGATIVE);
    assert_eq!(call(0, 4, 16, 4, &mut rgba, 0), EDGEFIRST_EEMPTY);
    assert_eq!(call(4, 0, 16, 4, &mut rgba, 0), EDGEFIRST_EEMPTY);
    assert_eq!(call(4, 4, 16, 2, &mut rgba, 0), EDGEFIRST_ESTRIDE);
    assert_eq!(call(4, 4, 16, 4, &mut rgba, 8), EDGEFIRST_ESTRIDE);
    assert_eq!(call(4, 4, 15, 4, &mut rgba, 0), EDGEFIRST_ESHORT);
    assert_eq!(call(4, 4, 16, 4, &mut rgba[..63], 0), EDGEFIRST_ESHORT);
    assert!(rgba.iter().all(|&b| b == 7));
}

#[test]
fn test_strerror() {
    for code in [
        EDGEFIRST_OK,
        EDGEFIRST_ENULL,
        EDGEFIRST_EEMPTY,
        EDGEFIRST_ESHORT,
        -1234,
    ] {
        let ptr = edgefirst_strerror(code);
        assert!(!ptr.is_null());
        let msg = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
        assert!(!msg.is_empty());
    }

    let msg = unsafe { CStr::from_ptr(edgefirst_strerror(EDGEFIRST_ENULL)) };
    assert_eq!(msg.to_str().unwrap(), "null buffer pointer");
    let msg = unsafe { CStr::from_ptr(edgefirst_strerror(-1234)) };
    assert_eq!(msg.to_str().unwrap(), "unknown error");
}

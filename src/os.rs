// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
#[cfg(unix)]
pub(crate) mod unix;
#[cfg(windows)]
pub(crate) mod windows;

#[cfg(unix)]
pub(crate) use unix as imp;
#[cfg(windows)]
pub(crate) use windows as imp;

/// Raw OS library handle, never null.
pub(crate) type Handle = std::ptr::NonNull<std::ffi::c_void>;

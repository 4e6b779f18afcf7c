// Copyright (c) 2023 Jonathan "Razordor" Alan Thomason
pub trait Sealed {}

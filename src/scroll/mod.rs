pub(crate) mod center;

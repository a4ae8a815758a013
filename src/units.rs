#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);

/// Canvas extents in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub u32);

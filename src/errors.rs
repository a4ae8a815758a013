// Create the Error, ErrorKind, ResultExt, and Result types.
// Callers match on `err.kind()` to tell the failure modes apart.
use error_chain::*;

error_chain! {
    errors {
        InvalidDimension(rows: usize, columns: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {} x {}: rows and columns must both be at least 1",
                    rows, columns)
        }
    }
}

//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# stacklog

stacklog builds one hierarchical log record per unit of work (typically one request) out of
flat, dot-addressed statements.

# The problem

Nested computations want nested logs.  A pricing request computes several formulas for
several customers, and the interesting output is a tree:

```text
waabox
  formulas
    sum: 10
    pow: 20
waabox_2
  formulas
    sum: 20
```

Building that tree by hand means passing parent nodes through every function that wants to
log.  With stacklog, each call site only names where its statement belongs, and the tree is
assembled at the end.

# The API

Each statement names a dotted *stack* and a message:

```rust
use stacklog::Aggregator;

let mut log = Aggregator::new();
log.log("waabox.formulas.sum", "10").unwrap();
log.log("waabox.formulas.pow", "20").unwrap();
log.log("waabox_2.formulas.sum", "20").unwrap();

let root = log.generate().unwrap();
assert_eq!(root.children().len(), 2);
println!("{root}");
```

Every prefix of a stack (`.waabox`, `.waabox.formulas`, ...) becomes a node of its own, and
each statement becomes a leaf under the node of its full stack.  Identical `(stack, message)`
pairs are recorded once.

## Globals

Stacks may contain `${name}` placeholders, filled from the logger's globals:

```rust
# let mut log = stacklog::Aggregator::new();
log.register_global("customer", "waabox");
log.log("${customer}.formulas.sum", "10").unwrap();
```

## Templates

Stacks that recur across a code base can be declared once as named [`Template`]s, loaded
from JSON into a [`TemplateSet`] and optionally installed process-wide with
[`global_templates::set_global_templates`].

# Execution contexts

A logger must only ever see the statements of its own unit of work.  The [`context`] module
provides explicit per-context stores, a thread-local registry with request-boundary hooks,
and a future wrapper that gives each async task its own registry.

# Diagnostics

stacklog reports its own anomalies (undeclared stacks, failed template lookups) through
[logwise](https://crates.io/crates/logwise).  Internal tracing is compiled in with the
`logwise_internal` feature.
*/

mod aggregator;
pub mod context;
mod error;
pub mod global_templates;
mod node;
mod template;

logwise::declare_logging_domain!();

pub use aggregator::Aggregator;
pub use error::Error;
pub use node::{Node, ROOT_STACK};
pub use template::{Template, TemplateSet};

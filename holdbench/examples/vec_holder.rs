//! Custom Holder: benchmark a third variant through the generic driver
//!
//! `VecHolder` stores its elements in a `Vec` and relies on `Clone` for
//! duplication and on plain Rust moves for transfer. Running it next to the
//! built-in variants shows that a `Vec` behaves like `MoveHolder`.
//!
//! Run with: cargo run --example vec_holder -p holdbench --release

use holdbench::labels::DEMO_TITLE;
use holdbench::{
    ConsoleReporter, DriverError, Element, Holder, HolderError, MoveHolder, Reporter, SectionKind,
    Sizes, TrackingAllocator, Transfer, move_addressable, run_variant,
};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

/// Holder backed by `Vec<Element>`
#[derive(Debug, Default)]
struct VecHolder {
    data: Vec<Element>,
}

impl Holder for VecHolder {
    const NAME: &'static str = "Vec-backed holder (Clone and Rust moves)";

    fn with_size(size: usize) -> Result<Self, HolderError> {
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| HolderError::Allocation { elements: size })?;
        data.resize(size, 0);
        Ok(Self { data })
    }

    fn duplicate(&self) -> Result<Self, HolderError> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| HolderError::Allocation {
                elements: self.data.len(),
            })?;
        data.extend_from_slice(&self.data);
        Ok(Self { data })
    }

    fn assign(&mut self, source: &Self) -> Result<(), HolderError> {
        self.data.clone_from(&source.data);
        Ok(())
    }

    fn from_value(source: Self) -> Result<Self, HolderError> {
        Ok(Self::transfer(source))
    }

    fn assign_value(&mut self, source: Self) -> Result<(), HolderError> {
        self.transfer_assign(source);
        Ok(())
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn as_slice(&self) -> &[Element] {
        &self.data
    }

    fn as_mut_slice(&mut self) -> &mut [Element] {
        &mut self.data
    }

    fn is_vacant(&self) -> bool {
        self.data.capacity() == 0
    }
}

impl Transfer for VecHolder {
    fn give_up(&mut self) -> Self {
        std::mem::take(self)
    }

    fn transfer(source: Self) -> Self {
        source
    }

    fn transfer_assign(&mut self, source: Self) {
        *self = source;
    }
}

fn compare<R: Reporter>(sizes: &Sizes, reporter: &mut R) -> Result<(), DriverError> {
    run_variant::<MoveHolder, R>(sizes, reporter)?;
    run_variant::<VecHolder, R>(sizes, reporter)?;

    reporter.section(SectionKind::Demonstration, DEMO_TITLE)?;
    move_addressable::<VecHolder, R>(sizes, reporter)
}

fn main() {
    let sizes = Sizes {
        regular: 1 << 24,
        large: 1 << 25,
        demo: 1 << 26,
    };
    let mut reporter = ConsoleReporter::new(std::io::stdout());

    if let Err(e) = compare(&sizes, &mut reporter) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

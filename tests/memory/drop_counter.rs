/*!
 * Drop Counter
 * Instrumented value that records how many times it was destroyed
 */

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug)]
pub struct Tracked {
    pub id: usize,
    drops: Rc<Cell<usize>>,
}

impl Tracked {
    pub fn new(id: usize, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            id,
            drops: Rc::clone(drops),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.id, &self.drops)
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

pub fn counter() -> Rc<Cell<usize>> {
    Rc::new(Cell::new(0))
}

///////////////////////////////////////////////////////////////////////////////
// Iterator permutations

#[cfg(test)]
use array_init::array_init;

#[cfg(test)]
pub fn permutations<T, const N: usize>(source: [&[T]; N]) -> impl Iterator<Item = [T; N]> + '_
where
  T: Copy,
{
  let mut indices: [usize; N] = [0; N];
  let mut done = false;
  std::iter::from_fn(move || {
    if done {
      return None;
    }
    let out = array_init(|i| source[i][indices[i]]);
    indices[0] += 1;
    let mut i = 0;
    while indices[i] >= source[i].len() {
      indices[i] = 0;
      i += 1;
      if i == N {
        done = true;
        break;
      } else {
        indices[i] += 1;
      }
    }
    Some(out)
  })
}

///////////////////////////////////////////////////////////////////////////////
// Doubly linked ring of node indices

/// Circular doubly linked list over the indices `0..len` that supports
/// deletions and appending fresh nodes.
#[derive(Debug, Clone, Default)]
pub struct List {
  prev: Vec<usize>,
  next: Vec<usize>,
}

impl List {
  pub fn with_capacity(capacity: usize) -> List {
    List {
      prev: Vec::with_capacity(capacity),
      next: Vec::with_capacity(capacity),
    }
  }

  /// Allocate a node that is linked to itself.
  pub fn push(&mut self) -> usize {
    let id = self.next.len();
    self.prev.push(id);
    self.next.push(id);
    id
  }

  /// Allocate a node and link it right after `after`. Returns the new node.
  pub fn insert_after(&mut self, after: usize) -> usize {
    let id = self.push();
    let next = self.next[after];
    self.next[after] = id;
    self.prev[id] = after;
    self.next[id] = next;
    self.prev[next] = id;
    id
  }

  pub fn prev(&self, vertex: usize) -> usize {
    self.prev[vertex]
  }

  pub fn next(&self, vertex: usize) -> usize {
    self.next[vertex]
  }

  pub fn link(&mut self, a: usize, b: usize) {
    self.next[a] = b;
    self.prev[b] = a;
  }

  pub fn delete(&mut self, vertex: usize) {
    let prev = self.prev[vertex];
    let next = self.next[vertex];
    self.next[prev] = next;
    self.prev[next] = prev;
  }

  /// Walk the ring that contains `start`, beginning at `start`.
  #[cfg(test)]
  pub fn iter(&self, start: usize) -> impl Iterator<Item = usize> + '_ {
    let mut focus = Some(start);
    std::iter::from_fn(move || {
      let out = focus?;
      let next = self.next[out];
      focus = if next == start { None } else { Some(next) };
      Some(out)
    })
  }
}

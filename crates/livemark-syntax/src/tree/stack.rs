use super::TreeError;
use super::container::ContainerId;

/// Path of open containers from the root down to the current receiver.
///
/// The root is pushed on construction and can never be popped.
#[derive(Debug, Clone)]
pub struct ContainerStack(Vec<ContainerId>);

impl ContainerStack {
    pub fn new(root: ContainerId) -> Self {
        Self(vec![root])
    }

    /// The container currently receiving tokens.
    pub fn top(&self) -> ContainerId {
        // Never empty: `pop` refuses to remove the root.
        self.0[self.0.len() - 1]
    }

    pub fn push(&mut self, id: ContainerId) {
        self.0.push(id);
    }

    pub fn pop(&mut self) -> Result<ContainerId, TreeError> {
        if self.0.len() == 1 {
            return Err(TreeError::StackUnderflow);
        }
        self.0.pop().ok_or(TreeError::StackUnderflow)
    }

    /// Number of containers above the root.
    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }

    pub fn as_slice(&self) -> &[ContainerId] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_always_present() {
        let mut stack = ContainerStack::new(ContainerId::ROOT);
        assert_eq!(stack.top(), ContainerId::ROOT);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.pop(), Err(TreeError::StackUnderflow));
        assert_eq!(stack.top(), ContainerId::ROOT);
    }

    #[test]
    fn push_and_pop_follow_nesting() {
        let mut stack = ContainerStack::new(ContainerId::ROOT);
        stack.push(ContainerId(1));
        stack.push(ContainerId(2));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(), Ok(ContainerId(2)));
        assert_eq!(stack.top(), ContainerId(1));
        assert_eq!(stack.as_slice(), &[ContainerId::ROOT, ContainerId(1)]);
    }
}

use crate::engine::{Executor, FanoutMin};
use crate::range::TailPolicy;

pub struct FanoutMinBuilder<'a, T> {
    data: &'a [T],
    fanout: Option<(usize, usize)>,
    policy: Option<TailPolicy>,
    executor: Option<Executor>,
}

impl<'a, T> FanoutMinBuilder<'a, T>
where
    T: Ord + Copy + Send + Sync,
{
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data,
            fanout: None,
            policy: None,
            executor: None,
        }
    }
    pub fn with_fanout(mut self, l1: usize, l2: usize) -> Self {
        self.fanout = Some((l1, l2));
        self
    }
    pub fn with_tail_policy(mut self, policy: TailPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = Some(executor);
        self
    }
    pub fn build(self) -> FanoutMin<'a, T> {
        let engine = match self.fanout {
            Some((l1, l2)) => FanoutMin::with_fanout(self.data, l1, l2),
            None => FanoutMin::new(self.data),
        };
        let engine = match self.policy {
            Some(policy) => engine.tail_policy(policy),
            None => engine,
        };
        match self.executor {
            Some(executor) => engine.executor(executor),
            None => engine,
        }
    }
}

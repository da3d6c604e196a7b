// JustOneClient/src/transport.rs

//! 传输层连接句柄的不透明占位。
//!
//! 网络模块（不在本 crate 中）建立连接后把句柄放进 `Session::network.controller`；
//! 会话只负责存放和清除这个引用，从不调用它的任何方法，也不会关闭它。

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 指向传输层控制器的共享、不透明句柄。
#[derive(Clone)]
pub struct TransportHandle {
    inner: Arc<dyn Any + Send + Sync>,
}

impl TransportHandle {
    pub fn new<T: Any + Send + Sync>(controller: T) -> Self {
        Self {
            inner: Arc::new(controller),
        }
    }

    /// 供网络模块取回自己放入的具体类型。
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// 两个句柄是否指向同一个控制器实例。
    pub fn same_controller(&self, other: &TransportHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for TransportHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportHandle")
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

/// Dimensions of a canvas node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeSize {
    pub width: f64,
    pub height: f64,
}

/// Resize a canvas node by one step, keeping its aspect ratio.
///
/// Canvas nodes grow on a positive wheel delta and shrink on a negative one,
/// the reverse of images. A step that would leave no width is not taken.
pub fn resize(size: NodeSize, delta_y: f64, step: u32) -> NodeSize {
    let step = f64::from(step);
    let width = if delta_y > 0.0 {
        size.width + step
    } else {
        size.width - step
    };
    if width <= 0.0 {
        return size;
    }
    if size.height <= 0.0 {
        return NodeSize {
            width,
            height: size.height,
        };
    }
    let aspect_ratio = size.width / size.height;
    NodeSize {
        width,
        height: width / aspect_ratio,
    }
}

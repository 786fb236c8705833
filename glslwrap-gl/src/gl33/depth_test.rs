use gl::types::*;

use glslwrap::depth_test::DepthComparison;

pub(crate) fn depth_comparison_to_glenum(dc: DepthComparison) -> GLenum {
  match dc {
    DepthComparison::Never => gl::NEVER,
    DepthComparison::Always => gl::ALWAYS,
    DepthComparison::Equal => gl::EQUAL,
    DepthComparison::NotEqual => gl::NOTEQUAL,
    DepthComparison::Less => gl::LESS,
    DepthComparison::LessOrEqual => gl::LEQUAL,
    DepthComparison::Greater => gl::GREATER,
    DepthComparison::GreaterOrEqual => gl::GEQUAL,
  }
}

pub(crate) fn glenum_to_depth_comparison(a: GLenum) -> Option<DepthComparison> {
  match a {
    gl::NEVER => Some(DepthComparison::Never),
    gl::ALWAYS => Some(DepthComparison::Always),
    gl::EQUAL => Some(DepthComparison::Equal),
    gl::NOTEQUAL => Some(DepthComparison::NotEqual),
    gl::LESS => Some(DepthComparison::Less),
    gl::LEQUAL => Some(DepthComparison::LessOrEqual),
    gl::GREATER => Some(DepthComparison::Greater),
    gl::GEQUAL => Some(DepthComparison::GreaterOrEqual),
    _ => None,
  }
}

